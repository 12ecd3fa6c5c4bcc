/// Julian date of the Unix epoch, 1970-01-01T00:00:00 UT.
pub const UNIX_EPOCH_JD: f64 = 2_440_587.5;
