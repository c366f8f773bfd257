pub mod explorator;
