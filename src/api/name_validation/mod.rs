pub mod name_validation_api;
