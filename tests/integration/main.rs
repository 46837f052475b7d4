mod address_tests;
mod class_hash_tests;
mod common;
mod compiler_tests;
