//! Tests for the genotype fixed-width codec

mod cultivar_tests;
