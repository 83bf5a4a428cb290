// SPDX-License-Identifier: MIT
// Copyright (c) 2026 StarTuz

use std::collections::HashMap;

use crate::legs::CargoJob;

/// Result of a Trip-Only optimization: the subset of jobs to book and the
/// leftovers, with the chosen totals. `chosen` and `rejected` partition
/// the input list, both in input order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TripSelection {
    pub pay: u32,
    pub pax: u32,
    pub kg: u32,
    pub chosen: Vec<CargoJob>,
    pub rejected: Vec<CargoJob>,
}

type Memo = HashMap<(usize, u32, u32), u32>;

/// Picks the subset of indivisible Trip-Only jobs maximizing total pay
/// under joint passenger and weight budgets (0/1 knapsack with two
/// capacity dimensions, memoized by item index and remaining budgets).
/// Ties prefer exclusion, so the first-seen optimal subset is stable.
pub fn maximize_trip_only(jobs: &[CargoJob], max_pax: u32, max_kg: u32) -> TripSelection {
    let mut memo = Memo::new();
    best_pay(jobs, jobs.len(), max_pax, max_kg, &mut memo);

    // Replay the decisions against the memo table to recover the subset.
    let mut chosen = Vec::new();
    let mut rejected = Vec::new();
    let mut pax_left = max_pax;
    let mut kg_left = max_kg;

    for i in (1..=jobs.len()).rev() {
        let job = jobs[i - 1];
        let without = best_pay(jobs, i - 1, pax_left, kg_left, &mut memo);
        if job.pax <= pax_left && job.kg <= kg_left {
            let with = job.pay + best_pay(jobs, i - 1, pax_left - job.pax, kg_left - job.kg, &mut memo);
            if with > without {
                chosen.push(job);
                pax_left -= job.pax;
                kg_left -= job.kg;
                continue;
            }
        }
        rejected.push(job);
    }

    chosen.reverse();
    rejected.reverse();

    TripSelection {
        pay: chosen.iter().map(|j| j.pay).sum(),
        pax: chosen.iter().map(|j| j.pax).sum(),
        kg: chosen.iter().map(|j| j.kg).sum(),
        chosen,
        rejected,
    }
}

fn best_pay(jobs: &[CargoJob], i: usize, max_pax: u32, max_kg: u32, memo: &mut Memo) -> u32 {
    if i == 0 {
        return 0;
    }
    if let Some(&cached) = memo.get(&(i, max_pax, max_kg)) {
        return cached;
    }

    let job = jobs[i - 1];
    let mut best = best_pay(jobs, i - 1, max_pax, max_kg, memo);
    if job.pax <= max_pax && job.kg <= max_kg {
        let with = job.pay + best_pay(jobs, i - 1, max_pax - job.pax, max_kg - job.kg, memo);
        if with > best {
            best = with;
        }
    }

    memo.insert((i, max_pax, max_kg), best);
    best
}

#[cfg(test)]
mod tests {
    use super::*;

    fn job(pay: u32, pax: u32, kg: u32) -> CargoJob {
        CargoJob { pax, kg, pay }
    }

    #[test]
    fn test_empty_input() {
        let result = maximize_trip_only(&[], 10, 1000);
        assert_eq!(result, TripSelection::default());
    }

    #[test]
    fn test_combination_beats_single_big_item() {
        let jobs = [job(100, 0, 50), job(80, 0, 30), job(90, 0, 40)];
        let result = maximize_trip_only(&jobs, 0, 70);
        assert_eq!(result.pay, 170);
        assert_eq!(result.kg, 70);
        assert_eq!(result.pax, 0);
        assert_eq!(result.chosen, vec![jobs[1], jobs[2]]);
        assert_eq!(result.rejected, vec![jobs[0]]);
    }

    #[test]
    fn test_budgets_are_hard_limits() {
        let jobs = [job(500, 4, 0), job(400, 3, 0), job(300, 0, 200)];
        let result = maximize_trip_only(&jobs, 5, 100);
        // Neither both pax jobs (7 pax) nor the cargo job (200 kg) fit.
        assert_eq!(result.pay, 500);
        assert!(result.pax <= 5);
        assert!(result.kg <= 100);
        assert_eq!(result.chosen, vec![jobs[0]]);
    }

    #[test]
    fn test_tie_prefers_exclusion() {
        // Two interchangeable jobs, room for one: the earlier job wins
        // because including the later one is not a strict improvement.
        let jobs = [job(100, 0, 50), job(100, 0, 50)];
        let result = maximize_trip_only(&jobs, 0, 50);
        assert_eq!(result.pay, 100);
        assert_eq!(result.chosen, vec![jobs[0]]);
        assert_eq!(result.rejected, vec![jobs[1]]);
    }

    #[test]
    fn test_partition_preserves_input_order() {
        let jobs = [
            job(10, 1, 0),
            job(20, 0, 30),
            job(30, 2, 0),
            job(40, 0, 60),
            job(50, 1, 0),
        ];
        let result = maximize_trip_only(&jobs, 2, 60);
        let mut recombined = result.chosen.clone();
        recombined.extend(result.rejected.iter().copied());
        recombined.sort_by_key(|j| j.pay);
        assert_eq!(recombined, jobs.to_vec());
        assert!(result.pax <= 2);
        assert!(result.kg <= 60);
    }

    #[test]
    fn test_matches_brute_force_on_small_inputs() {
        let jobs = [
            job(120, 2, 0),
            job(75, 0, 110),
            job(240, 3, 0),
            job(60, 0, 45),
            job(180, 1, 80),
        ];
        let (max_pax, max_kg) = (4, 150);
        let result = maximize_trip_only(&jobs, max_pax, max_kg);

        let mut best = 0u32;
        for mask in 0u32..(1 << jobs.len()) {
            let (mut pay, mut pax, mut kg) = (0u32, 0u32, 0u32);
            for (i, j) in jobs.iter().enumerate() {
                if mask & (1 << i) != 0 {
                    pay += j.pay;
                    pax += j.pax;
                    kg += j.kg;
                }
            }
            if pax <= max_pax && kg <= max_kg {
                best = best.max(pay);
            }
        }
        assert_eq!(result.pay, best);
        assert_eq!(
            result.pay,
            result.chosen.iter().map(|j| j.pay).sum::<u32>()
        );
    }

    #[test]
    fn test_zero_budgets_reject_everything_sized() {
        let jobs = [job(100, 1, 0), job(100, 0, 1), job(70, 0, 0)];
        let result = maximize_trip_only(&jobs, 0, 0);
        assert_eq!(result.pay, 70);
        assert_eq!(result.chosen, vec![jobs[2]]);
        assert_eq!(result.rejected, vec![jobs[0], jobs[1]]);
    }
}
