//! Balance calculation
//!
//! Computes how far each participant's payments in a period are above or
//! below an equal share of the period total.

use crate::error::{KakeiboError, KakeiboResult};
use crate::models::{Amount, Balance, Balances, ExpenseRecord, ParticipantSet};

/// Compute every participant's balance over `records`
///
/// `records` should already be filtered to a single period. Participants who
/// paid nothing get `-equal_share`. A record paid by someone outside the
/// participant set is rejected, since its amount could not be balanced.
pub fn compute_balances(
    records: &[ExpenseRecord],
    participants: &ParticipantSet,
) -> KakeiboResult<Balances> {
    if let Some(record) = records.iter().find(|r| !participants.contains(&r.payer)) {
        return Err(KakeiboError::UnknownParticipant {
            participant: record.payer.clone(),
            record: record.id.to_string(),
        });
    }

    let total: Amount = records.iter().map(|r| r.amount).sum();
    let equal_share = total / participants.len();

    let entries = participants
        .iter()
        .map(|participant| {
            let paid: Amount = records
                .iter()
                .filter(|r| r.payer == participant)
                .map(|r| r.amount)
                .sum();
            Balance {
                participant: participant.to_string(),
                paid,
                amount: paid - equal_share,
            }
        })
        .collect();

    log::debug!(
        "Balances over {} records: total {}, equal share {}",
        records.len(),
        total,
        equal_share
    );

    Ok(Balances {
        total,
        equal_share,
        entries,
    })
}
