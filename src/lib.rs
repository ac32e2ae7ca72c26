//! TalentScout - Conversational Candidate Screening Assistant
//!
//! This crate implements an LLM-backed intake conversation: it collects a
//! candidate's email, phone number, and years of experience from free-form
//! replies, then moves to a technical interview, and ends the session when
//! the candidate says goodbye.

pub mod adapters;
pub mod config;
pub mod domain;
pub mod ports;
