pub mod convert;
pub mod list;

#[cfg(test)]
mod convert_tests;
#[cfg(test)]
mod list_tests;
