mod macros;

pub(crate) use macros::for_tuples;
