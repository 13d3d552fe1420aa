//! Integration tests for SED components

mod blackbody_tests;
