//! # Field Encoding
//!
//! Encodings that make the comparator's binary path correct: integer
//! fields are stored big-endian with the sign bit flipped, so unsigned
//! byte comparison matches numeric order; float and double fields store
//! raw IEEE-754 bits and are decoded before comparison rather than
//! memcmp'd.

pub mod field;

pub use field::{
    decode_double, decode_float, encode_double, encode_float, encode_int2, encode_int4,
    encode_int8, encode_uint2, encode_uint4, encode_uint8,
};
