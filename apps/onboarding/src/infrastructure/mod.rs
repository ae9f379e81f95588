pub mod postal;
