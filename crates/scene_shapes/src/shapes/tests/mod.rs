//! Scene-level tests for shape features, groups and compositions

mod composition_integration;
