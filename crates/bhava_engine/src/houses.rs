//! House computation: whole-sign, Śrīpati arc-trisection and Placidus.
//!
//! Whole-sign and arc-trisection are computed here from the sidereal
//! Ascendant and Midheaven. Placidus borders come from the ephemeris
//! provider; where the provider reports them undefined (circumpolar
//! latitudes) the houses are rebuilt by arc-trisection and the response is
//! marked `fallback`.

use bhava_ephem::{Ephemeris, PlacidusOutcome, global};
use tracing::{debug, warn};

use crate::assemble::{Diagnostics, HouseArrays, HouseResponse, Houses, Status, assemble};
use crate::axes::{Axes, compute_axes};
use crate::ayanamsa::resolve_ayanamsa;
use crate::border::{borders_from_cusps, cusps_from_borders, widths_from_borders};
use crate::error::BhavaError;
use crate::geometry::Geometry;
use crate::house_types::{Backend, HouseOptions, HouseRequest, HouseSystem};
use crate::util::{arc_forward, normalize_360, opposite, to_sidereal};

/// Offset subtracted before locating the Ascendant's sign, so an Ascendant
/// sitting on a sign boundary stays in the sign that ends there.
pub const WHOLE_SIGN_EPS: f64 = 1e-9;

/// Whole-sign borders: the start of the Ascendant's sign, then every 30°.
pub fn whole_sign_borders(asc_sid_deg: f64) -> [f64; 12] {
    let start = ((asc_sid_deg - WHOLE_SIGN_EPS) / 30.0).floor() * 30.0;
    std::array::from_fn(|i| normalize_360(start + 30.0 * i as f64))
}

/// Whole-sign houses. Cusps sit mid-sign, widths are all 30°.
pub fn whole_sign_houses(asc_sid_deg: f64, options: HouseOptions) -> Houses {
    let borders = whole_sign_borders(asc_sid_deg);
    let cusps = borders.map(|b| normalize_360(b + 15.0));
    Houses::SignBased(HouseArrays {
        cusps_deg_sid: cusps,
        borders_deg_sid: options.return_borders.then_some(borders),
        width_deg: options.return_width.then_some([30.0; 12]),
    })
}

/// Śrīpati cusps: the four angles, plus trisection of the MC→Asc and
/// Asc→IC arcs; the remaining cusps are their opposites.
pub fn sripati_cusps(asc_sid_deg: f64, mc_sid_deg: f64) -> [f64; 12] {
    let asc = normalize_360(asc_sid_deg);
    let mc = normalize_360(mc_sid_deg);
    let ic = opposite(mc);

    let mut cusps = [0.0; 12];
    cusps[0] = asc;
    cusps[3] = ic;
    cusps[6] = opposite(asc);
    cusps[9] = mc;

    let step = arc_forward(mc, asc) / 3.0;
    cusps[10] = normalize_360(mc + step);
    cusps[11] = normalize_360(mc + 2.0 * step);
    cusps[4] = opposite(cusps[10]);
    cusps[5] = opposite(cusps[11]);

    let step = arc_forward(asc, ic) / 3.0;
    cusps[1] = normalize_360(asc + step);
    cusps[2] = normalize_360(asc + 2.0 * step);
    cusps[7] = opposite(cusps[1]);
    cusps[8] = opposite(cusps[2]);

    cusps
}

/// Arc-trisection houses; borders are derived from the cusps.
pub fn arc_trisection_houses(asc_sid_deg: f64, mc_sid_deg: f64, options: HouseOptions) -> Houses {
    let cusps = sripati_cusps(asc_sid_deg, mc_sid_deg);
    let borders =
        (options.return_borders || options.return_width).then(|| borders_from_cusps(&cusps));
    Houses::Cuspal(HouseArrays {
        cusps_deg_sid: cusps,
        borders_deg_sid: borders.filter(|_| options.return_borders),
        width_deg: borders
            .filter(|_| options.return_width)
            .map(|b| widths_from_borders(&b)),
    })
}

/// Time-division houses from sidereal borders; cusps are the midpoints.
pub fn time_division_houses(borders_sid: [f64; 12], options: HouseOptions) -> Houses {
    Houses::Cuspal(HouseArrays {
        cusps_deg_sid: cusps_from_borders(&borders_sid),
        borders_deg_sid: options.return_borders.then_some(borders_sid),
        width_deg: options
            .return_width
            .then(|| widths_from_borders(&borders_sid)),
    })
}

/// Compute houses through the process-wide provider, initialising it with
/// defaults on first use.
pub fn compute_houses(request: &HouseRequest) -> Result<HouseResponse, BhavaError> {
    compute_houses_with(global::get_or_init_default()?, request)
}

/// Compute houses through an explicit provider handle.
pub fn compute_houses_with(
    eph: &Ephemeris,
    request: &HouseRequest,
) -> Result<HouseResponse, BhavaError> {
    request.validate()?;
    let HouseRequest {
        jd_ut,
        latitude_deg: lat,
        longitude_deg: lon,
        house_system,
        options,
        ..
    } = *request;

    let mut diagnostics = Diagnostics::default();
    let ayanamsa = resolve_ayanamsa(&request.ayanamsa);
    if let Some(note) = &ayanamsa.warning {
        diagnostics.raise(Status::Warn, note.clone());
    }

    let geometry = Geometry::compute(eph, ayanamsa.mode, jd_ut, lon)?;
    let ayan = geometry.ayanamsa_deg;
    let requested = request.backend.resolve(house_system);
    debug!(
        system = house_system.name(),
        requested = request.backend.name(),
        resolved = requested.name(),
        "backend resolved"
    );

    let (backend, axes, houses) = match house_system {
        HouseSystem::SignBased => {
            let axes = compute_axes(eph, jd_ut, lat, lon, ayan)?;
            let houses = whole_sign_houses(axes.asc_deg_sid, options);
            (Backend::NativeGeometric, axes, houses)
        }
        HouseSystem::ArcTrisection => {
            let axes = compute_axes(eph, jd_ut, lat, lon, ayan)?;
            let houses = arc_trisection_houses(axes.asc_deg_sid, axes.mc_deg_sid, options);
            (Backend::NativeGeometric, axes, houses)
        }
        HouseSystem::TimeDivision if requested == Backend::NativeGeometric => {
            diagnostics.raise(
                Status::Fallback,
                "time-division (placidus) requires the provider-delegated backend; \
                 fallback to arc-trisection",
            );
            let axes = compute_axes(eph, jd_ut, lat, lon, ayan)?;
            let houses = arc_trisection_houses(axes.asc_deg_sid, axes.mc_deg_sid, options);
            (Backend::NativeGeometric, axes, houses)
        }
        HouseSystem::TimeDivision => match eph.placidus(jd_ut, lat, lon)? {
            PlacidusOutcome::Computed(p) => {
                let axes = Axes::from_tropical(p.ascendant_deg, p.midheaven_deg, ayan);
                let mut borders = p.borders_deg.map(|b| to_sidereal(b, ayan));
                // the angles and their borders must agree bit for bit
                borders[0] = axes.asc_deg_sid;
                borders[9] = axes.mc_deg_sid;
                (
                    Backend::ProviderDelegated,
                    axes,
                    time_division_houses(borders, options),
                )
            }
            PlacidusOutcome::Undefined {
                latitude_deg,
                reason,
            } => {
                warn!(latitude_deg, %reason, "placidus undefined, using arc-trisection");
                diagnostics.raise(
                    Status::Fallback,
                    format!(
                        "time-division (placidus) undefined at latitude {latitude_deg}°: \
                         {reason}; fallback to arc-trisection"
                    ),
                );
                let axes = compute_axes(eph, jd_ut, lat, lon, ayan)?;
                let houses = arc_trisection_houses(axes.asc_deg_sid, axes.mc_deg_sid, options);
                (Backend::NativeGeometric, axes, houses)
            }
        },
    };

    Ok(assemble(
        house_system,
        backend,
        ayanamsa.name(),
        &geometry,
        axes,
        houses,
        &diagnostics,
    ))
}
