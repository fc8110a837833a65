// PatientHealth Data
// This crate holds the patient record models and the store contract

// Repository contract and the in-memory store
pub mod repository;

// Data storage models
pub mod models;
