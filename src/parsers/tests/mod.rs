mod extraction_tests;
mod integration_tests;
