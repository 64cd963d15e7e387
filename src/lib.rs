//! Skill Roadmap - Adaptive self-assessment to learning plan
//!
//! A learner names a topic and a time commitment, answers a short generated
//! multiple-choice quiz, and receives a week-by-week roadmap sized to the
//! commitment and focused on the concepts they missed. Generation failures
//! never reach the learner: bundled content substitutes and the failure is
//! kept as a diagnostic on the session.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
