//! The PBO-based optimal selector.
//!
//! Builds the variables and clauses described in spec.md §4.3 over
//! [`crate::pbo::PboSolver`], runs the (optional) two-pass objective, and
//! projects the resulting model into installed UDWs plus a list of
//! [`Replacement`]s for the [`crate::plan::formal::FormalPlanner`].

use crate::cdw::Cdw;
use crate::codebook::{is_udw_length, Codebook};
use crate::pbo::{encode_and, Lit, Outcome, PboSolver, Var};
use crate::replacement::Replacement;
use crate::trit::{serialize, Trit};
use std::collections::HashMap;

pub struct FormalDictionarySelectorConfig {
    pub max_cdws: usize,
    pub ext_cdws: bool,
    pub two_pass: bool,
    pub conflict_limit: u32,
}

#[derive(Clone, Copy)]
struct Window {
    start: usize,
    len: usize,
    repl_var: Var,
}

pub struct FormalDictionarySelector {
    pub cfg: FormalDictionarySelectorConfig,
}

pub struct FormalResult {
    pub replacements: Vec<Replacement>,
    pub installed: Vec<String>,
}

impl FormalDictionarySelector {
    /// Runs both model-building and extraction, installing chosen UDWs into
    /// `codebook` and returning the raw replacement list for the planner.
    pub fn select(
        &self,
        bits: &[Trit],
        codebook: &mut Codebook,
    ) -> crate::error::Result<FormalResult> {
        let text = serialize(bits);
        let n = text.len();

        let mut solver = PboSolver::new();
        let mut windows: Vec<Window> = Vec::new();
        let mut udw_vars: HashMap<String, Var> = HashMap::new();
        let mut sbi_vars: Vec<Var> = Vec::with_capacity(n);

        for i in 0..n {
            sbi_vars.push(solver.add_var());
        }

        for &len in &[4usize, 8usize] {
            if !is_udw_length(len, self.cfg.ext_cdws) || n < len {
                continue;
            }
            for start in 0..=(n - len) {
                let word = &text[start..start + len];
                let var = solver.add_var();
                windows.push(Window {
                    start,
                    len,
                    repl_var: var,
                });

                if codebook.lookup(word) == Cdw::None {
                    let uvar = *udw_vars
                        .entry(word.to_string())
                        .or_insert_with(|| solver.add_var());
                    solver.add_clause(vec![Lit::neg(var), Lit::pos(uvar)]);
                }
            }
        }

        // Non-overlap: any two windows whose ranges intersect cannot both fire.
        for a in 0..windows.len() {
            for b in (a + 1)..windows.len() {
                let (wa, wb) = (windows[a], windows[b]);
                if wa.start < wb.start + wb.len && wb.start < wa.start + wa.len {
                    solver.add_clause(vec![Lit::neg(wa.repl_var), Lit::neg(wb.repl_var)]);
                }
            }
        }

        // Full coverage: every position is hit by a window or an SBI.
        for pos in 0..n {
            let mut disj = vec![Lit::pos(sbi_vars[pos])];
            for w in &windows {
                if pos >= w.start && pos < w.start + w.len {
                    disj.push(Lit::pos(w.repl_var));
                }
            }
            solver.add_clause(disj);
        }

        // Dictionary-size bounds: <=3 new length-4 UDWs, <= max_cdws-1 length-8.
        let len4_vars: Vec<(Lit, u32)> = udw_vars
            .iter()
            .filter(|(w, _)| w.len() == 4)
            .map(|(_, &v)| (Lit::pos(v), 1))
            .collect();
        let len8_vars: Vec<(Lit, u32)> = udw_vars
            .iter()
            .filter(|(w, _)| w.len() == 8)
            .map(|(_, &v)| (Lit::pos(v), 1))
            .collect();
        solver.add_weight_constraint(len4_vars, 3);
        let budget = (self.cfg.max_cdws as u32).saturating_sub(1);
        solver.add_weight_constraint(len8_vars, budget);

        // Merge extraction: identical adjacent windows of the same length.
        let mut merge_vars: Vec<(Var, Window, Window)> = Vec::new();
        for w in &windows {
            if let Some(next) = windows
                .iter()
                .find(|o| o.start == w.start + w.len && o.len == w.len)
            {
                if text[w.start..w.start + w.len] == text[next.start..next.start + next.len] {
                    let merge_var = solver.add_var();
                    encode_and(
                        &mut solver,
                        Lit::pos(w.repl_var),
                        Lit::pos(next.repl_var),
                        Lit::pos(merge_var),
                    );
                    merge_vars.push((merge_var, *w, *next));
                }
            }
        }

        // Every position is trivially covered by its own SBI, with every
        // window/UDW/merge var false — always a feasible (if unoptimized)
        // coverage model. Seeding it means a conflict-limit exhaustion
        // reports this model instead of `Unsat` (spec.md §4.3: "partial
        // models are acceptable iff they satisfy coverage").
        let mut all_sbi_seed = vec![false; solver.num_vars()];
        for &v in &sbi_vars {
            all_sbi_seed[v as usize] = true;
        }

        // Pass 1: minimize SBIs (weight 3) plus merges (weight 2).
        let mut objective: Vec<(Lit, i64)> =
            sbi_vars.iter().map(|&v| (Lit::pos(v), 3)).collect();
        objective.extend(merge_vars.iter().map(|(v, _, _)| (Lit::pos(*v), 2)));
        solver.minimize(objective.clone());

        let model = match solver.solve(&[], self.cfg.conflict_limit, Some(all_sbi_seed.clone())) {
            Outcome::Model(m) => m,
            Outcome::LimitReached(m) => m,
            Outcome::Unsat => return Err(crate::error::Error::ModelExtraction),
        };

        if self.cfg.two_pass {
            let sbi_count: u32 = sbi_vars.iter().filter(|&&v| model[v as usize]).count() as u32;
            let bound = ((sbi_count as f64) * 1.05).ceil() as u32;
            solver.add_weight_constraint(
                sbi_vars.iter().map(|&v| (Lit::pos(v), 1)).collect(),
                bound,
            );
            let mut len_objective: Vec<(Lit, i64)> = windows
                .iter()
                .map(|w| (Lit::pos(w.repl_var), if w.len == 8 { 2 } else { 1 }))
                .collect();
            len_objective.extend(sbi_vars.iter().map(|&v| (Lit::pos(v), 2)));
            solver.minimize(len_objective);
            // Pass 1's model already respects the tightened SBI budget
            // (it is at or below the first-pass optimum), so it is always a
            // valid seed for pass 2.
            if let Outcome::Model(m) | Outcome::LimitReached(m) =
                solver.solve(&[], self.cfg.conflict_limit, Some(model.clone()))
            {
                return Ok(self.extract(&text, &windows, &sbi_vars, &udw_vars, &m, codebook));
            }
        }

        Ok(self.extract(&text, &windows, &sbi_vars, &udw_vars, &model, codebook))
    }

    fn extract(
        &self,
        text: &str,
        windows: &[Window],
        sbi_vars: &[Var],
        udw_vars: &HashMap<String, Var>,
        model: &[bool],
        codebook: &mut Codebook,
    ) -> FormalResult {
        let mut installed = Vec::new();
        for (word, &var) in udw_vars {
            if model[var as usize] {
                if codebook.store_dyn(word).unwrap_or(false) {
                    installed.push(word.clone());
                }
            }
        }

        let mut replacements = Vec::new();
        for w in windows {
            if model[w.repl_var as usize] {
                let word = &text[w.start..w.start + w.len];
                let cdw = codebook.lookup(word);
                if cdw.is_valid() {
                    let benefit = codebook.benefit(cdw);
                    replacements.push(Replacement::new(cdw, w.start, w.start + w.len, benefit));
                }
            }
        }
        for (i, &v) in sbi_vars.iter().enumerate() {
            if model[v as usize] {
                let word = &text[i..i + 1];
                let cdw = codebook.lookup(word);
                let benefit = codebook.benefit(cdw);
                replacements.push(Replacement::new(cdw, i, i + 1, benefit));
            }
        }
        FormalResult {
            replacements,
            installed,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn falls_back_to_single_bit_injections_for_tiny_input() {
        let bits: Vec<Trit> = "0101".chars().map(|c| Trit::from_char(c).unwrap()).collect();
        let sel = FormalDictionarySelector {
            cfg: FormalDictionarySelectorConfig {
                max_cdws: 8,
                ext_cdws: false,
                two_pass: false,
                conflict_limit: 500,
            },
        };
        let mut cb = Codebook::new(false, 8);
        let result = sel.select(&bits, &mut cb).unwrap();
        assert!(!result.replacements.is_empty());
    }
}
