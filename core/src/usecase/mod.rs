pub mod calendar;
pub mod statistics;

#[cfg(test)]
mod usecase_test;
