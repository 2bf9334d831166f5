//! End-to-end behaviour of house requests through an `Ephemeris` handle.

use std::sync::Arc;

use bhava_engine::*;
use bhava_ephem::{
    AngleSet, Ephemeris, EphemerisError, EphemerisProvider, PlacidusBorders, PlacidusOutcome,
    ProviderConfig, SiderealMode,
};

const JD: f64 = 2_447_021.6875;
const LAT: f64 = 44.715_313_2;
const LON: f64 = 42.997_871_6;

fn native() -> Ephemeris {
    Ephemeris::native(ProviderConfig::default()).unwrap()
}

fn assert_normalized(values: &[f64; 12]) {
    for v in values {
        assert!((0.0..360.0).contains(v), "{v} not in [0, 360)");
    }
}

/// Provider returning fixed values, so expected sidereal output is exact.
struct FixedProvider {
    mode: SiderealMode,
    placidus: PlacidusOutcome,
}

impl FixedProvider {
    const AYANAMSA: f64 = 24.0;

    fn boxed(placidus: PlacidusOutcome) -> Box<dyn EphemerisProvider> {
        Box::new(Self {
            mode: SiderealMode::Lahiri,
            placidus,
        })
    }
}

impl EphemerisProvider for FixedProvider {
    fn name(&self) -> &'static str {
        "fixed"
    }
    fn set_sidereal_mode(&mut self, mode: SiderealMode) {
        self.mode = mode;
    }
    fn sidereal_mode(&self) -> SiderealMode {
        self.mode
    }
    fn ayanamsa_deg(&mut self, _jd_ut: f64) -> Result<f64, EphemerisError> {
        Ok(Self::AYANAMSA)
    }
    fn obliquity_deg(&mut self, _jd_ut: f64) -> Result<f64, EphemerisError> {
        Ok(23.44)
    }
    fn sidereal_time_hours(&mut self, _jd_ut: f64) -> Result<f64, EphemerisError> {
        Ok(6.0)
    }
    fn angles(&mut self, _jd_ut: f64, _lat: f64, _lon: f64) -> Result<AngleSet, EphemerisError> {
        Ok(AngleSet {
            ascendant_deg: 184.0,
            midheaven_deg: 94.0,
            armc_deg: 90.0,
        })
    }
    fn placidus(
        &mut self,
        _jd_ut: f64,
        _lat: f64,
        _lon: f64,
    ) -> Result<PlacidusOutcome, EphemerisError> {
        Ok(self.placidus.clone())
    }
}

const FIXED_BORDERS: [f64; 12] = [
    184.0, 212.0, 244.0, 274.0, 302.0, 334.0, 4.0, 32.0, 64.0, 94.0, 122.0, 154.0,
];

fn fixed_computed() -> Ephemeris {
    Ephemeris::new(FixedProvider::boxed(PlacidusOutcome::Computed(
        PlacidusBorders {
            borders_deg: FIXED_BORDERS,
            ascendant_deg: 184.0,
            midheaven_deg: 94.0,
        },
    )))
}

/// Provider whose every call fails.
struct BrokenProvider;

impl EphemerisProvider for BrokenProvider {
    fn name(&self) -> &'static str {
        "broken"
    }
    fn set_sidereal_mode(&mut self, _mode: SiderealMode) {}
    fn sidereal_mode(&self) -> SiderealMode {
        SiderealMode::Lahiri
    }
    fn ayanamsa_deg(&mut self, jd_ut: f64) -> Result<f64, EphemerisError> {
        Err(EphemerisError::EpochOutOfRange { jd_ut })
    }
    fn obliquity_deg(&mut self, jd_ut: f64) -> Result<f64, EphemerisError> {
        Err(EphemerisError::EpochOutOfRange { jd_ut })
    }
    fn sidereal_time_hours(&mut self, jd_ut: f64) -> Result<f64, EphemerisError> {
        Err(EphemerisError::EpochOutOfRange { jd_ut })
    }
    fn angles(&mut self, jd_ut: f64, _lat: f64, _lon: f64) -> Result<AngleSet, EphemerisError> {
        Err(EphemerisError::EpochOutOfRange { jd_ut })
    }
    fn placidus(
        &mut self,
        jd_ut: f64,
        _lat: f64,
        _lon: f64,
    ) -> Result<PlacidusOutcome, EphemerisError> {
        Err(EphemerisError::EpochOutOfRange { jd_ut })
    }
}

// ---------------------------------------------------------------------------
// Sign-based
// ---------------------------------------------------------------------------

#[test]
fn sign_based_structure() {
    let req = HouseRequest::new(JD, LAT, LON).with_borders().with_widths();
    let resp = compute_houses_with(&native(), &req).unwrap();

    assert_eq!(resp.meta.house_system, HouseSystem::SignBased);
    assert_eq!(resp.meta.backend, Backend::NativeGeometric);
    assert_eq!(resp.meta.status, Status::Ok);
    assert!(resp.meta.notes.is_none());

    let borders = resp.houses.borders().unwrap();
    let cusps = resp.houses.cusps();
    assert_normalized(borders);
    assert_normalized(cusps);
    assert_eq!(borders[0] % 30.0, 0.0);
    for i in 0..12 {
        assert_eq!(borders[i], normalize_360(borders[0] + 30.0 * i as f64));
        assert_eq!(cusps[i], normalize_360(borders[i] + 15.0));
    }
    assert_eq!(resp.houses.widths(), Some(&[30.0; 12]));

    // the Ascendant lies in house 1
    let asc = resp.angles.asc_deg_sid;
    assert!(arc_forward(borders[0], asc) <= 30.0);
}

#[test]
fn sign_based_round_trip_is_stable() {
    let req = HouseRequest::new(JD, LAT, LON).with_borders();
    let resp = compute_houses_with(&native(), &req).unwrap();
    let borders = *resp.houses.borders().unwrap();

    let cusps = cusps_from_borders(&borders);
    assert_eq!(&cusps, resp.houses.cusps());
    let again = borders_from_cusps(&cusps);
    for i in 0..12 {
        assert!((again[i] - borders[i]).abs() < 1e-9);
    }
}

// ---------------------------------------------------------------------------
// Arc-trisection
// ---------------------------------------------------------------------------

#[test]
fn arc_trisection_angles_are_cusps() {
    let req = HouseRequest::new(JD, LAT, LON)
        .with_system(HouseSystem::ArcTrisection)
        .with_borders()
        .with_widths();
    let resp = compute_houses_with(&native(), &req).unwrap();
    let cusps = resp.houses.cusps();

    assert_eq!(resp.houses.kind(), "cuspal");
    assert_normalized(cusps);
    assert_eq!(cusps[0], resp.angles.asc_deg_sid);
    assert_eq!(cusps[3], resp.angles.ic_deg_sid);
    assert_eq!(cusps[6], resp.angles.desc_deg_sid);
    assert_eq!(cusps[9], resp.angles.mc_deg_sid);

    let total: f64 = resp.houses.widths().unwrap().iter().sum();
    assert!((total - 360.0).abs() < 1e-6);

    // opposite houses have equal width
    let w = resp.houses.widths().unwrap();
    for i in 0..6 {
        assert!((w[i] - w[i + 6]).abs() < 1e-9);
    }
}

#[test]
fn arc_trisection_borders_are_cusp_midpoints() {
    let req = HouseRequest::new(JD, LAT, LON)
        .with_system(HouseSystem::ArcTrisection)
        .with_borders();
    let resp = compute_houses_with(&native(), &req).unwrap();
    let cusps = resp.houses.cusps();
    let borders = resp.houses.borders().unwrap();
    assert_normalized(borders);
    for i in 0..12 {
        let prev = cusps[(i + 11) % 12];
        let mid = normalize_360(prev + arc_forward(prev, cusps[i]) / 2.0);
        assert!((borders[i] - mid).abs() < 1e-9, "border {i}");
    }
    assert!(resp.houses.widths().is_none());
}

#[test]
fn ayanamsa_conventions_shift_cusps() {
    let eph = native();
    let base = HouseRequest::new(JD, LAT, LON).with_system(HouseSystem::ArcTrisection);
    let lahiri = compute_houses_with(&eph, &base.clone().with_ayanamsa("Lahiri")).unwrap();
    let kp = compute_houses_with(&eph, &base.with_ayanamsa("Krishnamurti")).unwrap();

    assert_eq!(kp.meta.ayanamsa.name, "krishnamurti");
    let diff = kp.meta.ayanamsa.value_deg - lahiri.meta.ayanamsa.value_deg;
    assert!(diff.abs() > 1e-3);
    for i in 0..12 {
        let shift = normalize_360(lahiri.houses.cusps()[i] - kp.houses.cusps()[i]);
        assert!((shift - normalize_360(diff)).abs() < 1e-9, "cusp {i}");
    }
}

// ---------------------------------------------------------------------------
// Time-division
// ---------------------------------------------------------------------------

#[test]
fn placidus_borders_anchor_on_angles() {
    let req = HouseRequest::new(JD, LAT, LON)
        .with_system(HouseSystem::TimeDivision)
        .with_borders()
        .with_widths();
    let resp = compute_houses_with(&native(), &req).unwrap();

    assert_eq!(resp.meta.backend, Backend::ProviderDelegated);
    assert_eq!(resp.meta.status, Status::Ok);
    let borders = resp.houses.borders().unwrap();
    assert_normalized(borders);
    assert_normalized(resp.houses.cusps());
    assert_eq!(borders[0], resp.angles.asc_deg_sid);
    assert_eq!(borders[9], resp.angles.mc_deg_sid);

    let total: f64 = resp.houses.widths().unwrap().iter().sum();
    assert!((total - 360.0).abs() < 1e-6);
}

#[test]
fn placidus_sidereal_conversion_is_exact() {
    let req = HouseRequest::new(JD, 10.0, 0.0)
        .with_system(HouseSystem::TimeDivision)
        .with_borders();
    let resp = compute_houses_with(&fixed_computed(), &req).unwrap();

    let expected = FIXED_BORDERS.map(|b| normalize_360(b - FixedProvider::AYANAMSA));
    assert_eq!(resp.houses.borders(), Some(&expected));
    assert_eq!(resp.angles.asc_deg_sid, 160.0);
    assert_eq!(resp.angles.mc_deg_sid, 70.0);
    assert_eq!(resp.angles.asc_deg_trop, 184.0);
    // cusp of house 1 sits between borders 1 and 2
    assert_eq!(resp.houses.cusps()[0], 174.0);
}

#[test]
fn placidus_falls_back_inside_polar_circle() {
    let req = HouseRequest::new(2_447_013.856, 70.0, 0.0).with_system(HouseSystem::TimeDivision);
    let resp = compute_houses_with(&native(), &req).unwrap();

    assert_eq!(resp.meta.status, Status::Fallback);
    assert_eq!(resp.meta.backend, Backend::NativeGeometric);
    assert_eq!(resp.meta.house_system, HouseSystem::TimeDivision);
    let notes = resp.meta.notes.as_deref().unwrap();
    assert!(notes.contains("undefined at latitude 70°"), "{notes}");
    assert!(notes.ends_with("fallback to arc-trisection"), "{notes}");

    // the fallback houses are arc-trisection houses
    assert_eq!(resp.houses.kind(), "cuspal");
    assert_eq!(resp.houses.cusps()[0], resp.angles.asc_deg_sid);
    assert_eq!(resp.houses.cusps()[9], resp.angles.mc_deg_sid);
    assert_normalized(resp.houses.cusps());
}

#[test]
fn placidus_undefined_from_provider_is_fallback() {
    let eph = Ephemeris::new(FixedProvider::boxed(PlacidusOutcome::Undefined {
        latitude_deg: 10.0,
        reason: "cusp point is circumpolar".into(),
    }));
    let req = HouseRequest::new(JD, 10.0, 0.0).with_system(HouseSystem::TimeDivision);
    let resp = compute_houses_with(&eph, &req).unwrap();
    assert_eq!(resp.meta.status, Status::Fallback);
    assert_eq!(
        resp.meta.notes.as_deref(),
        Some(
            "time-division (placidus) undefined at latitude 10°: cusp point is circumpolar; \
             fallback to arc-trisection"
        )
    );
    assert_eq!(resp.houses.cusps()[0], 160.0);
}

#[test]
fn native_backend_cannot_divide_time() {
    let req = HouseRequest::new(JD, LAT, LON)
        .with_system(HouseSystem::TimeDivision)
        .with_backend(Backend::NativeGeometric);
    let resp = compute_houses_with(&native(), &req).unwrap();
    assert_eq!(resp.meta.status, Status::Fallback);
    assert_eq!(resp.meta.backend, Backend::NativeGeometric);
    assert!(
        resp.meta
            .notes
            .as_deref()
            .unwrap()
            .contains("requires the provider-delegated backend")
    );
}

#[test]
fn local_systems_ignore_provider_backend() {
    let req = HouseRequest::new(JD, LAT, LON)
        .with_system(HouseSystem::ArcTrisection)
        .with_backend(Backend::ProviderDelegated);
    let resp = compute_houses_with(&native(), &req).unwrap();
    assert_eq!(resp.meta.backend, Backend::NativeGeometric);
    assert_eq!(resp.meta.status, Status::Ok);
}

// ---------------------------------------------------------------------------
// Degradation and errors
// ---------------------------------------------------------------------------

#[test]
fn unknown_ayanamsa_warns_and_uses_lahiri() {
    let eph = native();
    let req = HouseRequest::new(JD, LAT, LON).with_ayanamsa("galactic-whatever");
    let resp = compute_houses_with(&eph, &req).unwrap();
    assert_eq!(resp.meta.status, Status::Warn);
    assert_eq!(resp.meta.ayanamsa.name, "lahiri");
    assert_eq!(
        resp.meta.notes.as_deref(),
        Some("unknown ayanamsa 'galactic-whatever', fallback to Lahiri")
    );

    let lahiri = compute_houses_with(&eph, &HouseRequest::new(JD, LAT, LON)).unwrap();
    assert_eq!(resp.houses, lahiri.houses);
}

#[test]
fn fallback_outranks_warning_and_notes_accumulate() {
    let req = HouseRequest::new(2_447_013.856, 70.0, 0.0)
        .with_system(HouseSystem::TimeDivision)
        .with_ayanamsa("nope");
    let resp = compute_houses_with(&native(), &req).unwrap();
    assert_eq!(resp.meta.status, Status::Fallback);
    let notes = resp.meta.notes.unwrap();
    let parts: Vec<&str> = notes.split("; ").collect();
    assert!(parts[0].starts_with("unknown ayanamsa 'nope'"));
    assert!(notes.contains("undefined at latitude 70°"));
}

#[test]
fn invalid_input_is_rejected() {
    let eph = native();
    for req in [
        HouseRequest::new(f64::NAN, 0.0, 0.0),
        HouseRequest::new(JD, 91.0, 0.0),
        HouseRequest::new(JD, -90.5, 0.0),
        HouseRequest::new(JD, 0.0, f64::INFINITY),
    ] {
        assert!(matches!(
            compute_houses_with(&eph, &req),
            Err(BhavaError::InvalidInput(_))
        ));
    }
}

#[test]
fn poles_are_valid_for_local_systems() {
    let eph = native();
    for lat in [90.0, -90.0] {
        let req = HouseRequest::new(JD, lat, 0.0).with_system(HouseSystem::ArcTrisection);
        let resp = compute_houses_with(&eph, &req).unwrap();
        assert_normalized(resp.houses.cusps());
    }
}

#[test]
fn provider_failure_is_ephemeris_error() {
    let eph = Ephemeris::new(Box::new(BrokenProvider));
    let err = compute_houses_with(&eph, &HouseRequest::new(JD, LAT, LON)).unwrap_err();
    assert_eq!(
        err,
        BhavaError::Ephemeris(EphemerisError::EpochOutOfRange { jd_ut: JD })
    );
    assert!(err.to_string().starts_with("calculation failed"));
}

#[test]
fn epoch_outside_configured_range_fails() {
    let eph = Ephemeris::native(ProviderConfig {
        min_jd_ut: 2_440_000.0,
        max_jd_ut: 2_450_000.0,
        ..ProviderConfig::default()
    })
    .unwrap();
    let err = compute_houses_with(&eph, &HouseRequest::new(2_460_000.5, 0.0, 0.0)).unwrap_err();
    assert!(matches!(
        err,
        BhavaError::Ephemeris(EphemerisError::EpochOutOfRange { .. })
    ));
}

// ---------------------------------------------------------------------------
// Response shape
// ---------------------------------------------------------------------------

#[test]
fn json_shape() {
    let req = HouseRequest::new(JD, LAT, LON)
        .with_system(HouseSystem::TimeDivision)
        .with_borders();
    let resp = compute_houses_with(&native(), &req).unwrap();
    let v = serde_json::to_value(&resp).unwrap();

    assert_eq!(v["meta"]["house_system"], "time-division");
    assert_eq!(v["meta"]["backend"], "provider-delegated");
    assert_eq!(v["meta"]["ayanamsa"]["name"], "lahiri");
    assert_eq!(v["meta"]["status"], "ok");
    assert!(v["meta"].get("notes").is_none());
    for key in ["epsilon_deg", "ramc_deg", "lst_hours"] {
        assert!(v["meta"][key].is_number(), "{key}");
    }
    for key in [
        "asc_deg_sid",
        "mc_deg_sid",
        "desc_deg_sid",
        "ic_deg_sid",
        "asc_deg_trop",
        "mc_deg_trop",
    ] {
        assert!(v["angles"][key].is_number(), "{key}");
    }
    assert_eq!(v["houses"]["type"], "cuspal");
    assert_eq!(v["houses"]["cusps_deg_sid"].as_array().unwrap().len(), 12);
    assert_eq!(v["houses"]["borders_deg_sid"].as_array().unwrap().len(), 12);
    assert!(v["houses"].get("width_deg").is_none());
    assert_eq!(v["classification"]["kendra"], serde_json::json!([1, 4, 7, 10]));
    assert_eq!(v["classification"]["dusthana"], serde_json::json!([6, 8, 12]));
}

#[test]
fn json_shape_sign_based_fallback_notes() {
    let req = HouseRequest::new(JD, LAT, LON).with_ayanamsa("unknown");
    let resp = compute_houses_with(&native(), &req).unwrap();
    let v = serde_json::to_value(&resp).unwrap();
    assert_eq!(v["houses"]["type"], "sign-based");
    assert_eq!(v["meta"]["status"], "warn");
    assert!(v["meta"]["notes"].is_string());
    assert!(v["houses"].get("borders_deg_sid").is_none());
}

// ---------------------------------------------------------------------------
// Concurrency
// ---------------------------------------------------------------------------

#[test]
fn concurrent_requests_match_sequential() {
    let eph = Arc::new(native());
    let requests: Vec<HouseRequest> = ["Lahiri", "Krishnamurti", "Raman", "Fagan-Bradley"]
        .iter()
        .map(|name| {
            HouseRequest::new(JD, LAT, LON)
                .with_system(HouseSystem::TimeDivision)
                .with_ayanamsa(*name)
        })
        .collect();
    let expected: Vec<HouseResponse> = requests
        .iter()
        .map(|r| compute_houses_with(&eph, r).unwrap())
        .collect();

    let handles: Vec<_> = requests
        .into_iter()
        .map(|req| {
            let eph = Arc::clone(&eph);
            std::thread::spawn(move || {
                (0..50)
                    .map(|_| compute_houses_with(&eph, &req).unwrap())
                    .collect::<Vec<_>>()
            })
        })
        .collect();

    for (h, want) in handles.into_iter().zip(expected) {
        for got in h.join().unwrap() {
            assert_eq!(got, want);
        }
    }
}

#[test]
fn settings_drive_requests() {
    let settings = Settings::from_toml_str(
        r#"
        ayanamsa = "kp"
        house_system = "sripati"
        return_width = true
        "#,
    )
    .unwrap();
    let eph = Ephemeris::native(settings.provider).unwrap();
    let resp = compute_houses_with(&eph, &settings.request(JD, LAT, LON)).unwrap();
    assert_eq!(resp.meta.house_system, HouseSystem::ArcTrisection);
    assert_eq!(resp.meta.ayanamsa.name, "krishnamurti");
    assert!(resp.houses.widths().is_some());
    assert!(resp.houses.borders().is_none());
}

#[test]
fn global_entry_point_initialises_on_first_use() {
    let req = HouseRequest::new(JD, LAT, LON).with_system(HouseSystem::ArcTrisection);
    let resp = compute_houses(&req).unwrap();
    assert!(bhava_ephem::global::is_initialized());
    assert_eq!(resp, compute_houses_with(&native(), &req).unwrap());
}
