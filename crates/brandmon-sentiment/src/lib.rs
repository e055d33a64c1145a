//! Keyword-counting sentiment classifier for Brand Monitor.
//!
//! Two independently maintained lexicon variants exist: the full lists used
//! by the site-scoped search path and the compact lists used by the direct
//! platform clients and the mock generator. Both apply the same rule —
//! strict majority wins, ties (including 0/0) are neutral. The divergence
//! between the two vocabularies is deliberate-until-decided-otherwise; do
//! not merge them.

mod classifier;

pub use classifier::{classify, classify_compact};
