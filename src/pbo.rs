//! A small pseudo-boolean optimization (PBO) engine.
//!
//! Spec ties the formal selector to an abstract solver interface
//! (`add_var`/`add_clause`/`add_weight_constraint`/`minimize`/`solve`) and
//! explicitly treats the engine behind it as replaceable. No crate in this
//! workspace's dependency stack provides a PBO/SAT solver, so this module is
//! a direct, in-crate implementation of that interface: a backtracking
//! search with branch-and-bound objective minimization, pruning a branch as
//! soon as any clause whose variables are all assigned is violated (rather
//! than only checking satisfiability at a full leaf assignment). It is
//! correct but not competitive with a production SAT engine, which matches
//! the spec's framing of solver internals as out of scope.
//!
//! `solve` takes an optional caller-supplied `seed`: a model the caller
//! already knows is feasible. Per spec.md §4.3/§9, "partial models are
//! acceptable iff they satisfy coverage" on limit exhaustion — without a
//! seed, an instance whose branch order happens to explore only infeasible
//! leaves before the conflict limit is reached would otherwise be
//! misreported as `Unsat` even though a feasible model exists. The seed is
//! validated against the current clauses/weights/assumptions before use, so
//! a stale or inconsistent seed is simply ignored rather than trusted blindly.

pub type Var = u32;

/// A literal: a variable, optionally negated.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Lit {
    pub var: Var,
    pub negated: bool,
}

impl Lit {
    pub fn pos(var: Var) -> Self {
        Lit {
            var,
            negated: false,
        }
    }
    pub fn neg(var: Var) -> Self {
        Lit {
            var,
            negated: true,
        }
    }

    fn holds(self, assignment: &[bool]) -> bool {
        assignment[self.var as usize] != self.negated
    }
}

/// A bounded weighted-sum constraint: `sum(weight_i * lit_i) <= bound`.
pub struct WeightConstraint {
    pub lits: Vec<(Lit, u32)>,
    pub bound: u32,
}

/// Why `solve` stopped.
pub enum Outcome {
    Model(Vec<bool>),
    Unsat,
    LimitReached(Vec<bool>),
}

#[derive(Default)]
pub struct PboSolver {
    num_vars: u32,
    clauses: Vec<Vec<Lit>>,
    weight_constraints: Vec<WeightConstraint>,
    objective: Vec<(Lit, i64)>,
}

impl PboSolver {
    pub fn new() -> Self {
        PboSolver::default()
    }

    pub fn add_var(&mut self) -> Var {
        let v = self.num_vars;
        self.num_vars += 1;
        v
    }

    pub fn num_vars(&self) -> usize {
        self.num_vars as usize
    }

    pub fn add_clause(&mut self, lits: Vec<Lit>) {
        self.clauses.push(lits);
    }

    pub fn add_weight_constraint(&mut self, lits: Vec<(Lit, u32)>, bound: u32) {
        self.weight_constraints.push(WeightConstraint { lits, bound });
    }

    /// Replaces the minimization objective (weighted sum over literals that
    /// hold true in the model).
    pub fn minimize(&mut self, terms: Vec<(Lit, i64)>) {
        self.objective = terms;
    }

    /// Solve under `assumptions` (literals forced true), stopping backtrack
    /// exploration after `conflict_limit` dead ends (0 = unbounded). `seed`,
    /// if it validates against the current clauses/weights/assumptions, is
    /// installed as the initial incumbent so limit exhaustion can never
    /// regress below a model the caller already knows is feasible.
    pub fn solve(&self, assumptions: &[Lit], conflict_limit: u32, seed: Option<Vec<bool>>) -> Outcome {
        let n = self.num_vars as usize;
        let mut assignment = vec![false; n];
        let mut fixed = vec![false; n];
        for &a in assumptions {
            fixed[a.var as usize] = true;
            assignment[a.var as usize] = !a.negated;
        }

        let mut best: Option<(Vec<bool>, i64)> = seed.and_then(|model| {
            let consistent = model.len() == n
                && assumptions.iter().all(|a| model[a.var as usize] == !a.negated);
            if consistent && self.clauses_satisfied(&model) && self.weights_satisfied(&model) {
                let value = self.objective_value(&model);
                Some((model, value))
            } else {
                None
            }
        });

        let mut clauses_by_max_var: Vec<Vec<usize>> = vec![Vec::new(); n.max(1)];
        for (ci, clause) in self.clauses.iter().enumerate() {
            let max_var = clause.iter().map(|l| l.var as usize).max().unwrap_or(0);
            clauses_by_max_var[max_var.min(clauses_by_max_var.len() - 1)].push(ci);
        }

        let mut conflicts = 0u32;
        self.search(
            &mut assignment,
            &fixed,
            0,
            &mut conflicts,
            conflict_limit,
            &mut best,
            &clauses_by_max_var,
        );

        match best {
            Some((model, _)) => {
                if conflict_limit > 0 && conflicts >= conflict_limit {
                    Outcome::LimitReached(model)
                } else {
                    Outcome::Model(model)
                }
            }
            None => Outcome::Unsat,
        }
    }

    fn clauses_satisfied(&self, assignment: &[bool]) -> bool {
        self.clauses
            .iter()
            .all(|c| c.iter().any(|&l| l.holds(assignment)))
    }

    fn weights_satisfied(&self, assignment: &[bool]) -> bool {
        self.weight_constraints.iter().all(|wc| {
            let sum: u32 = wc
                .lits
                .iter()
                .filter(|(l, _)| l.holds(assignment))
                .map(|(_, w)| *w)
                .sum();
            sum <= wc.bound
        })
    }

    fn objective_value(&self, assignment: &[bool]) -> i64 {
        self.objective
            .iter()
            .filter(|(l, _)| l.holds(assignment))
            .map(|(_, w)| *w)
            .sum()
    }

    /// `true` if any clause whose variables are all `<= just_assigned` is
    /// violated by `assignment` — the branch rooted here can never recover,
    /// so the caller should back off instead of descending further.
    fn violates_a_decided_clause(
        &self,
        assignment: &[bool],
        just_assigned: u32,
        clauses_by_max_var: &[Vec<usize>],
    ) -> bool {
        clauses_by_max_var[just_assigned as usize]
            .iter()
            .any(|&ci| !self.clauses[ci].iter().any(|l| l.holds(assignment)))
    }

    fn search(
        &self,
        assignment: &mut Vec<bool>,
        fixed: &[bool],
        next_var: u32,
        conflicts: &mut u32,
        conflict_limit: u32,
        best: &mut Option<(Vec<bool>, i64)>,
        clauses_by_max_var: &[Vec<usize>],
    ) {
        if conflict_limit > 0 && *conflicts >= conflict_limit {
            return;
        }
        if next_var as usize == assignment.len() {
            if self.weights_satisfied(assignment) {
                let value = self.objective_value(assignment);
                if best.as_ref().map(|(_, v)| value < *v).unwrap_or(true) {
                    *best = Some((assignment.clone(), value));
                }
            } else {
                *conflicts += 1;
            }
            return;
        }
        let candidates: &[bool] = if fixed[next_var as usize] {
            let v = assignment[next_var as usize];
            if v {
                &[true]
            } else {
                &[false]
            }
        } else {
            &[true, false]
        };
        for &v in candidates {
            assignment[next_var as usize] = v;
            if self.violates_a_decided_clause(assignment, next_var, clauses_by_max_var) {
                *conflicts += 1;
            } else {
                self.search(
                    assignment,
                    fixed,
                    next_var + 1,
                    conflicts,
                    conflict_limit,
                    best,
                    clauses_by_max_var,
                );
            }
            if conflict_limit > 0 && *conflicts >= conflict_limit {
                return;
            }
        }
    }
}

/// Tseitin encoding of `c <-> (a AND b)`, used for the formal selector's
/// `merge(a,b)` extraction.
pub fn encode_and(solver: &mut PboSolver, a: Lit, b: Lit, c: Lit) {
    solver.add_clause(vec![Lit::neg(a.var), Lit::neg(b.var), Lit::pos(c.var)]);
    solver.add_clause(vec![Lit::neg(c.var), Lit::pos(a.var)]);
    solver.add_clause(vec![Lit::neg(c.var), Lit::pos(b.var)]);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn solves_a_trivial_satisfiable_instance() {
        let mut solver = PboSolver::new();
        let a = solver.add_var();
        let b = solver.add_var();
        solver.add_clause(vec![Lit::pos(a), Lit::pos(b)]);
        solver.minimize(vec![(Lit::pos(a), 1), (Lit::pos(b), 1)]);
        match solver.solve(&[], 0, None) {
            Outcome::Model(m) => assert!(m[a as usize] || m[b as usize]),
            _ => panic!("expected a model"),
        }
    }

    #[test]
    fn reports_unsat_for_contradictory_clauses() {
        let mut solver = PboSolver::new();
        let a = solver.add_var();
        solver.add_clause(vec![Lit::pos(a)]);
        solver.add_clause(vec![Lit::neg(a)]);
        assert!(matches!(solver.solve(&[], 0, None), Outcome::Unsat));
    }

    #[test]
    fn weight_constraint_bounds_true_literals() {
        let mut solver = PboSolver::new();
        let a = solver.add_var();
        let b = solver.add_var();
        solver.add_clause(vec![Lit::pos(a)]);
        solver.add_clause(vec![Lit::pos(b)]);
        solver.add_weight_constraint(vec![(Lit::pos(a), 1), (Lit::pos(b), 1)], 1);
        assert!(matches!(solver.solve(&[], 0, None), Outcome::Unsat));
    }

    #[test]
    fn a_feasible_seed_survives_limit_exhaustion() {
        let mut solver = PboSolver::new();
        let vars: Vec<Var> = (0..6).map(|_| solver.add_var()).collect();
        // Every position must be covered by its own literal.
        for &v in &vars {
            solver.add_clause(vec![Lit::pos(v)]);
        }
        // A run of extra vars that must each be false; branching tries
        // `true` first, so each level burns exactly one conflict before
        // backtracking to `false`, exhausting a small conflict budget long
        // before the search would reach a leaf on its own.
        let extra: Vec<Var> = (0..16).map(|_| solver.add_var()).collect();
        for &v in &extra {
            solver.add_clause(vec![Lit::neg(v)]);
        }

        let mut seed = vec![false; solver.num_vars()];
        for &v in &vars {
            seed[v as usize] = true;
        }

        match solver.solve(&[], 4, Some(seed)) {
            Outcome::LimitReached(model) | Outcome::Model(model) => {
                assert!(vars.iter().all(|&v| model[v as usize]));
                assert!(extra.iter().all(|&v| !model[v as usize]));
            }
            Outcome::Unsat => panic!("a feasible seed must never report Unsat"),
        }
    }
}
