pub mod vectorizers;
