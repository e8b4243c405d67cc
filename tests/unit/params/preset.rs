use super::*;
use crate::params::model::{Param, ParameterSet};

#[test]
fn every_bundle_is_within_documented_ranges() {
    for preset in Preset::ALL {
        let p = ParameterSet::from_preset(preset);
        let b = preset.bundle();
        assert_eq!(p.brightness(), b.brightness, "{preset}");
        assert_eq!(p.hue(), b.hue, "{preset}");
        for param in Param::ALL {
            let r = param.range();
            let v = p.get(param);
            assert!(v >= r.min && v <= r.max, "{preset} {}", param.name());
        }
    }
}

#[test]
fn none_has_no_overlays_and_others_do() {
    assert!(Preset::None.overlays().is_empty());
    for preset in [Preset::Film, Preset::Lofi, Preset::Vhs, Preset::Ultra] {
        assert!(!preset.overlays().is_empty(), "{preset}");
    }
}

#[test]
fn parse_is_case_insensitive() {
    assert_eq!("VHS".parse::<Preset>().unwrap(), Preset::Vhs);
    assert_eq!(" film ".parse::<Preset>().unwrap(), Preset::Film);
    assert!("sepia".parse::<Preset>().is_err());
}
