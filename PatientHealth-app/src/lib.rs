// PatientHealth-app lib.rs
//
// Console runner for the PatientHealth checks: configuration, scenario
// loading and the scenario runner used by the binary.

pub mod config;
pub mod runner;
pub mod scenario;
