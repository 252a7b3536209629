use adrt_fht_testing::test_fht_scalar;

test_fht_scalar!(u32);
test_fht_scalar!(i32);
test_fht_scalar!(u64);
test_fht_scalar!(i64);
test_fht_scalar!(f32);
test_fht_scalar!(f64);
