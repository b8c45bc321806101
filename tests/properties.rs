//! Integration tests exercising the engine's public surface against the
//! concrete end-to-end scenarios and cross-cutting properties (factor-count
//! bound, determinism, Montgomery/Mayer round-trips at every width).

use factor_engine::montgomery::{Flavor, Montgomery};
use factor_engine::numeric::mayer::MayerDivisor;
use factor_engine::numeric::UInt;
use factor_engine::{factorize_to_sequence, is_prime};

fn assert_factorization_correct<T: UInt>(x: T, factors: &[T]) {
    let product = factors
        .iter()
        .fold(T::ONE, |acc, &p| acc.wrapping_mul(p));
    assert_eq!(product, x, "product of factors does not reconstruct x");
    for &p in factors {
        assert!(is_prime(p), "{p:?} is not prime");
    }
}

#[test]
fn concrete_scenario_6630() {
    let x = 2u64 * 3 * 5 * 13 * 17;
    let mut out: Vec<u64> = Vec::new();
    factorize_to_sequence(x, &mut out);
    out.sort_unstable();
    assert_eq!(out, vec![2, 3, 5, 13, 17]);
    assert_factorization_correct(x, &out);
}

#[test]
fn concrete_scenario_eight_43_fiftynine_squared_onetwelve() {
    let factors = [2u32, 2, 2, 43, 59, 59, 113];
    let x: u32 = factors.iter().product();
    let mut out: Vec<u32> = Vec::new();
    factorize_to_sequence(x, &mut out);
    out.sort_unstable();
    let mut expect = factors.to_vec();
    expect.sort_unstable();
    assert_eq!(out, expect);
}

#[test]
fn concrete_scenario_prime_squared() {
    let x: u32 = 32771 * 32771;
    let mut out: Vec<u32> = Vec::new();
    factorize_to_sequence(x, &mut out);
    out.sort_unstable();
    assert_eq!(out, vec![32771, 32771]);
}

#[test]
fn concrete_scenario_near_2_32_semiprime() {
    let a: u64 = 4_294_967_279; // 2^32 - 17
    let b: u64 = 4_294_967_291; // 2^32 - 5
    let x: u128 = a as u128 * b as u128;
    assert!(x <= u64::MAX as u128);
    let x = x as u64;
    let mut out: Vec<u64> = Vec::new();
    factorize_to_sequence(x, &mut out);
    out.sort_unstable();
    assert_eq!(out, vec![a, b]);
}

#[test]
fn concrete_scenario_ten_factor_128_bit_product() {
    let factors = [2u128, 2, 3, 5, 13, 17, 101, 131, 157, 157];
    let x: u128 = factors.iter().product();
    let mut out: Vec<u128> = Vec::new();
    factorize_to_sequence(x, &mut out);
    out.sort_unstable();
    let mut expect = factors.to_vec();
    expect.sort_unstable();
    assert_eq!(out, expect);
}

#[test]
fn concrete_scenario_322() {
    let mut out: Vec<u64> = Vec::new();
    factorize_to_sequence(322u64, &mut out);
    out.sort_unstable();
    assert_eq!(out, vec![2, 7, 23]);
}

#[test]
fn primality_spot_checks() {
    assert!(is_prime(127u64));
    assert!(!is_prime(141u64));
    assert!(is_prime(u64::MAX - 58)); // 2^64 - 59
    assert!(!is_prime(u64::MAX - 56)); // 2^64 - 57
}

#[test]
fn determinism_across_repeated_calls() {
    let x = 2u64 * 2 * 3 * 5 * 13 * 17 * 101 * 131;
    let mut first: Vec<u64> = Vec::new();
    factorize_to_sequence(x, &mut first);
    first.sort_unstable();

    for _ in 0..20 {
        let mut again: Vec<u64> = Vec::new();
        factorize_to_sequence(x, &mut again);
        again.sort_unstable();
        assert_eq!(first, again);
    }
}

#[test]
fn factor_count_never_exceeds_bit_width() {
    for x in 2u64..20_000 {
        let mut out: Vec<u64> = Vec::new();
        factorize_to_sequence(x, &mut out);
        assert!(out.len() as u32 <= 64, "too many factors for {x}: {out:?}");
    }
}

#[test]
fn montgomery_round_trip_holds_across_widths() {
    fn check<T: UInt>(n: T, a: T, b: T) {
        let m = Montgomery::new(n, Flavor::choose(n));
        let va = m.convert_in(a);
        assert_eq!(m.convert_out(va), a);
        let vb = m.convert_in(b);
        let product = m.convert_out(m.mul(va, vb));
        let expect = (a.to_u128() * b.to_u128()) % n.to_u128();
        assert_eq!(product.to_u128(), expect);
    }

    check::<u8>(251, 3, 7);
    check::<u16>(65521, 123, 456);
    check::<u32>(4_294_967_291, 12345, 6789);
    check::<u64>(1_000_000_007, 999_999_999, 2);
    check::<u128>((1u128 << 100) + 3, 123_456_789, 987_654_321);
}

#[test]
fn mayer_divisibility_round_trip_holds_across_widths() {
    fn check<T: UInt>(d: T, values: &[T]) {
        let md = MayerDivisor::new(d);
        for &x in values {
            let result = md.try_divide(x);
            if x.to_u128() % d.to_u128() == 0 {
                let q = result.expect("must divide");
                assert_eq!(q.to_u128() * d.to_u128(), x.to_u128());
            } else {
                assert_eq!(result, None);
            }
        }
    }

    check::<u8>(7, &[0, 7, 14, 21, 200, 201]);
    check::<u32>(97, &[0, 97, 194, 1000, 9700]);
    check::<u128>(0x1_0000_0001, &[0, 0x1_0000_0001, 0x2_0000_0002, 123]);
}
