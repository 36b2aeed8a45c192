//! CLI module containing argument parsing

pub mod args;

#[cfg(test)]
mod tests;
