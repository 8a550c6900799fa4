// Two handler tiers: public (no identity) and dashboard (session required).
pub mod dashboard;
pub mod public;
