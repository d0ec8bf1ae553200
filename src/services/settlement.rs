//! Settlement planning
//!
//! Turns period balances into payment instructions. The pass order is fixed by
//! the participant list: each debtor, in list order, pays the creditors in list
//! order until its deficit is gone. This does not minimise the number of
//! transfers, but for the same inputs it always yields the same breakdown.

use crate::error::KakeiboResult;
use crate::models::{Amount, Balances, ExpenseRecord, ParticipantSet, Period, Transfer};

use super::balance::compute_balances;
use super::period::records_in_period;

/// Plan the transfers that bring every balance to zero
pub fn plan_settlements(balances: &Balances, participants: &ParticipantSet) -> Vec<Transfer> {
    let names = participants.as_slice();
    let threshold = balances.threshold();
    let mut working: Vec<Amount> = names.iter().map(|name| balances.get(name)).collect();
    let mut transfers = Vec::new();

    for from in 0..names.len() {
        for to in 0..names.len() {
            if from == to {
                continue;
            }
            // Both sides must clear the threshold, so every transfer does too
            if working[from].value() < -threshold && working[to].value() > threshold {
                let amount = (-working[from]).min(working[to]);
                transfers.push(Transfer::new(&names[from], &names[to], amount));
                working[from] += amount;
                working[to] -= amount;
            }
        }
    }

    let tolerance = balances.residue_tolerance();
    let residue = working.iter().position(|b| b.value().abs() > tolerance);
    if let Some(idx) = residue {
        log::error!(
            "Settlement left {} with residual balance {}; input balances did not sum to zero",
            names[idx],
            working[idx].value()
        );
    }
    debug_assert!(residue.is_none(), "settlement residue above tolerance");

    transfers
}

/// Balances and transfers for one period
#[derive(Debug, Clone)]
pub struct SettlementPlan {
    pub period: Period,
    pub record_count: usize,
    pub balances: Balances,
    pub transfers: Vec<Transfer>,
}

/// Run the full settlement flow for `period`: filter, balance, plan
pub fn settle_period(
    records: &[ExpenseRecord],
    participants: &ParticipantSet,
    period: Period,
) -> KakeiboResult<SettlementPlan> {
    let in_period = records_in_period(records, &period);
    let balances = compute_balances(&in_period, participants)?;
    let transfers = plan_settlements(&balances, participants);

    log::debug!(
        "Planned {} transfers for {} from {} records",
        transfers.len(),
        period,
        in_period.len()
    );

    Ok(SettlementPlan {
        period,
        record_count: in_period.len(),
        balances,
        transfers,
    })
}
