mod common;

mod test_turn_resolution;
