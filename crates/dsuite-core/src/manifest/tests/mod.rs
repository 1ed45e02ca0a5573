// Manifest test module
#[cfg(test)]
mod writer_tests;
