//! Proto ↔ runtime conversion bridge.
//!
//! `TurnRecord` is the runtime-side representation of a settled
//! quarter; the proto types are its wire form in the append-only log.
//! Doubles cross the bridge untouched, so a replay from disk feeds the
//! engine the exact bits the player chose.

use std::io;

use nation_engine::domain::PolicyInputs;

use crate::proto_types::{ProtoPolicyInputs, ProtoTurnEnvelope};

/// A settled quarter as stored in the turn log.
#[derive(Debug, Clone, PartialEq)]
pub struct TurnRecord {
    pub sequence: u64,
    /// Year and quarter that the policy settled (pre-advance).
    pub year: i32,
    pub quarter: u8,
    pub policy: PolicyInputs,
}

/// Convert a protobuf envelope to a runtime TurnRecord.
///
/// The wire format is decoded strictly: a frame without a policy
/// record or with a quarter that does not fit the runtime type is a
/// corrupt log entry, not something to coerce.
pub fn proto_to_turn(proto: &ProtoTurnEnvelope) -> io::Result<TurnRecord> {
    let p = proto.policy.as_ref().ok_or_else(|| {
        io::Error::new(
            io::ErrorKind::InvalidData,
            format!("Turn {} has no policy record", proto.sequence),
        )
    })?;
    let quarter = u8::try_from(proto.quarter).map_err(|_| {
        io::Error::new(
            io::ErrorKind::InvalidData,
            format!(
                "Turn {}: quarter {} out of range",
                proto.sequence, proto.quarter
            ),
        )
    })?;
    Ok(TurnRecord {
        sequence: proto.sequence,
        year: proto.year,
        quarter,
        policy: PolicyInputs {
            invest_share: p.invest_share,
            rnd_share: p.rnd_share,
            train_per_person: p.train_per_person,
            maintain_per_eq: p.maintain_per_eq,
            tax_delta: p.tax_delta,
        },
    })
}

/// Convert a runtime TurnRecord to its protobuf envelope.
pub fn turn_to_proto(turn: &TurnRecord) -> ProtoTurnEnvelope {
    ProtoTurnEnvelope {
        sequence: turn.sequence,
        year: turn.year,
        quarter: turn.quarter as u32,
        policy: Some(ProtoPolicyInputs {
            invest_share: turn.policy.invest_share,
            rnd_share: turn.policy.rnd_share,
            train_per_person: turn.policy.train_per_person,
            maintain_per_eq: turn.policy.maintain_per_eq,
            tax_delta: turn.policy.tax_delta,
        }),
    }
}
