use proptest::prelude::*;

use crate::{Error, Opt};

fn opt_strategy() -> impl Strategy<Value=Opt<i64>> {
  proptest::option::of(any::<i64>()).prop_map(Opt::from)
}

fn half_if_even(v: i64) -> Opt<i64> {
  Opt::present_if(v / 2, |_| v % 2 == 0)
}

fn negate_if_positive(v: i64) -> Opt<i64> {
  Opt::present_if(v, |v| *v > 0).map(|v| -v)
}

proptest! {
  #[test]
  fn of_is_present_iff_value_is_present(value in proptest::option::of(any::<i64>())) {
    let opt = Opt::<i64>::of(value);
    prop_assert_eq!(opt.is_present(), value.is_some());
    if value.is_none() {
      prop_assert_eq!(opt, Opt::absent());
    }
  }

  #[test]
  fn present_never_falls_back(value in any::<i64>(), fallback in any::<i64>()) {
    prop_assert_eq!(Opt::<i64>::present(value).map(|opt| opt.or(fallback)), Ok(value));
  }

  #[test]
  fn present_rejects_absent_sentinel(_seed in any::<u8>()) {
    prop_assert_eq!(
      Opt::<i64>::present(None),
      Err(Error::InvalidArgument("cannot create a present value from an absent one"))
    );
  }

  #[test]
  fn map_identity_is_identity(opt in opt_strategy()) {
    prop_assert_eq!(opt.map(|v| v), opt);
  }

  #[test]
  fn map_composes(opt in opt_strategy()) {
    let f = |v: i64| v.wrapping_mul(3);
    let g = |v: i64| v.wrapping_sub(7);
    prop_assert_eq!(opt.map(f).map(g), opt.map(|v| g(f(v))));
  }

  #[test]
  fn flat_map_is_associative(value in any::<i64>()) {
    let opt = Opt::Present(value);
    prop_assert_eq!(
      opt.flat_map(half_if_even).flat_map(negate_if_positive),
      opt.flat_map(|v| half_if_even(v).flat_map(negate_if_positive))
    );
  }

  #[test]
  fn flat_map_present_is_left_identity(value in any::<i64>()) {
    prop_assert_eq!(Opt::Present(value).flat_map(half_if_even), half_if_even(value));
  }

  #[test]
  fn filter_never_creates_presence(opt in opt_strategy(), keep in any::<bool>()) {
    let filtered = opt.filter(|_| keep);
    prop_assert!(filtered.is_absent() || filtered == opt);
    prop_assert_eq!(filtered.is_present(), opt.is_present() && keep);
  }

  #[test]
  fn invert_twice_restores_presence(opt in opt_strategy()) {
    prop_assert_eq!(opt.invert(()).invert(0).is_present(), opt.is_present());
  }

  #[test]
  fn both_is_present_iff_both_are(a in opt_strategy(), b in opt_strategy()) {
    prop_assert_eq!(a.both(b).is_present(), a.is_present() && b.is_present());
  }

  #[test]
  fn option_round_trips(opt in opt_strategy()) {
    prop_assert_eq!(Opt::from(opt.into_option()), opt);
  }
}
