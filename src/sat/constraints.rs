//! Clauses, formulas, and reusable clause generators

use itertools::Itertools;

/// Represents a SAT clause (disjunction of literals)
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Clause {
    pub literals: Vec<i32>, // Positive for variable, negative for negation
}

impl Clause {
    /// Create a new clause from literals
    pub fn new(literals: Vec<i32>) -> Self {
        Self { literals }
    }

    /// Create a unit clause (single literal)
    pub fn unit(literal: i32) -> Self {
        Self { literals: vec![literal] }
    }

    /// Create a binary clause (two literals)
    pub fn binary(lit1: i32, lit2: i32) -> Self {
        Self { literals: vec![lit1, lit2] }
    }

    /// Check if clause is empty (unsatisfiable)
    pub fn is_empty(&self) -> bool {
        self.literals.is_empty()
    }

    /// Check if clause is unit
    pub fn is_unit(&self) -> bool {
        self.literals.len() == 1
    }

    /// Evaluate the clause under a total assignment lookup
    pub fn is_satisfied_by(&self, value: impl Fn(i32) -> bool) -> bool {
        self.literals
            .iter()
            .any(|&lit| if lit > 0 { value(lit) } else { !value(-lit) })
    }
}

/// A CNF formula. Clauses can only be appended, never removed or edited.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Formula {
    clauses: Vec<Clause>,
}

impl Formula {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, clause: Clause) {
        self.clauses.push(clause);
    }

    pub fn extend(&mut self, clauses: impl IntoIterator<Item = Clause>) {
        self.clauses.extend(clauses);
    }

    pub fn clauses(&self) -> &[Clause] {
        &self.clauses
    }

    pub fn len(&self) -> usize {
        self.clauses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.clauses.is_empty()
    }

    /// An empty clause makes the whole formula unsatisfiable
    pub fn has_empty_clause(&self) -> bool {
        self.clauses.iter().any(Clause::is_empty)
    }
}

/// At least one of `vars` is true
pub fn at_least_one(vars: &[i32]) -> Clause {
    Clause::new(vars.to_vec())
}

/// At most one of `vars` is true (pairwise encoding)
pub fn at_most_one(vars: &[i32]) -> Vec<Clause> {
    vars.iter()
        .tuple_combinations()
        .map(|(&a, &b)| Clause::binary(-a, -b))
        .collect()
}

/// Exactly one of `vars` is true
pub fn exactly_one(vars: &[i32]) -> Vec<Clause> {
    let mut clauses = vec![at_least_one(vars)];
    clauses.extend(at_most_one(vars));
    clauses
}

/// If every literal in `antecedents` holds, one of `consequents` holds
pub fn implies_any(antecedents: &[i32], consequents: &[i32]) -> Clause {
    let mut literals: Vec<i32> = antecedents.iter().map(|&lit| -lit).collect();
    literals.extend_from_slice(consequents);
    Clause::new(literals)
}

/// The literals in `conjunction` are never all true together
pub fn forbid_all(conjunction: &[i32]) -> Clause {
    implies_any(conjunction, &[])
}

/// `var` is false
pub fn forbid(var: i32) -> Clause {
    Clause::unit(-var)
}
