pub mod analyze;
pub mod glossary;
