//! Hand-written protobuf types for the turn log wire format.
//!
//! Uses prost derive macros for encode/decode without prost-build.
//! Field numbers are frozen — the on-disk log must stay readable.

use prost::Message;

// ── Turn Envelope ──────────────────────────────────────────────

/// One settled quarter: which quarter it was and the policy record
/// that settled it.
#[derive(Clone, PartialEq, Message)]
pub struct ProtoTurnEnvelope {
    #[prost(uint64, tag = "1")]
    pub sequence: u64,
    #[prost(int32, tag = "2")]
    pub year: i32,
    #[prost(uint32, tag = "3")]
    pub quarter: u32,
    #[prost(message, optional, tag = "4")]
    pub policy: Option<ProtoPolicyInputs>,
}

// ── Policy Inputs ──────────────────────────────────────────────

#[derive(Clone, PartialEq, Message)]
pub struct ProtoPolicyInputs {
    #[prost(double, tag = "1")]
    pub invest_share: f64,
    #[prost(double, tag = "2")]
    pub rnd_share: f64,
    #[prost(double, tag = "3")]
    pub train_per_person: f64,
    #[prost(double, tag = "4")]
    pub maintain_per_eq: f64,
    #[prost(double, tag = "5")]
    pub tax_delta: f64,
}
