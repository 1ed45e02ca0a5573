// Registry test module
#[cfg(test)]
mod suite_tests;
