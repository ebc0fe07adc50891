pub mod test_artifact;
pub mod test_partial_failure;
