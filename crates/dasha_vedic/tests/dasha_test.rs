//! Integration tests for the Vimshottari period tree.
//!
//! Everything here is pure math on a supplied Moon longitude; no ephemeris.

use dasha_time::{CivilTime, UtcOffset, jd_from_local};
use dasha_vedic::dasha::{
    DAYS_PER_YEAR, DashaConfig, DashaLevel, MAX_DASHA_DEPTH, SubtreeRequest, active_chain,
    build_level, compute_mahadashas, compute_subtree, dasha_cycle, nakshatra_lord,
    resolve_birth_lord, vimshottari_report,
};
use dasha_vedic::{LORD_CYCLE, Lord, NAKSHATRA_SPAN_27, TOTAL_CYCLE_YEARS, lord_at};

const J2000: f64 = 2_451_545.0;

/// Moon at 0° (start of Ashwini) → full Ketu period still to run.
#[test]
fn moon_at_zero_starts_fresh_ketu() {
    let ctx = resolve_birth_lord(0.0, J2000).unwrap();
    assert_eq!(ctx.nakshatra_index, 0);
    assert_eq!(ctx.fraction_elapsed, 0.0);
    assert_eq!(ctx.start_lord, Lord::Ketu);
    assert_eq!(ctx.elapsed_years, 0.0);
    assert_eq!(ctx.start_jd, J2000);
}

/// Moon exactly one nakshatra in → Bharani, Venus, nothing elapsed.
#[test]
fn moon_at_one_segment_starts_fresh_venus() {
    let ctx = resolve_birth_lord(NAKSHATRA_SPAN_27, J2000).unwrap();
    assert_eq!(ctx.nakshatra_index, 1);
    assert!(ctx.fraction_elapsed.abs() < 1e-9);
    assert_eq!(ctx.start_lord, Lord::Venus);
}

/// Just short of the boundary still belongs to Ashwini.
#[test]
fn moon_just_before_boundary_is_late_ashwini() {
    let ctx = resolve_birth_lord(13.333_333, J2000).unwrap();
    assert_eq!(ctx.nakshatra_index, 0);
    assert!(ctx.fraction_elapsed > 0.999_99);
    assert_eq!(ctx.start_lord, Lord::Ketu);
}

/// Ketu-first cycle: 7 years then the rest, 120 years total.
#[test]
fn ketu_cycle_spans() {
    let md = compute_mahadashas(J2000, Lord::Ketu).unwrap();
    assert_eq!(md.len(), 9);
    assert!((md[0].duration_days() - 7.0 * DAYS_PER_YEAR).abs() < 1e-6);
    assert!((md[0].duration_days() - 2556.6975).abs() < 1e-6);
    assert!((md[8].end_jd - md[0].start_jd - 43_829.1).abs() < 1e-6);
    let lords: Vec<Lord> = md.iter().map(|n| n.lord).collect();
    assert_eq!(lords, LORD_CYCLE.to_vec());
}

/// Subtree of the Saturn Mahadasha: nine children, Saturn first, spanning it.
#[test]
fn subtree_rotation_starts_at_node_lord() {
    let md = compute_mahadashas(J2000, Lord::Ketu).unwrap();
    let saturn = &md[7];
    assert_eq!(saturn.lord, Lord::Saturn);

    let children = compute_subtree(saturn.start_jd, saturn.end_jd, 1, saturn.lord).unwrap();
    assert_eq!(children.len(), 9);
    for (i, c) in children.iter().enumerate() {
        assert_eq!(c.lord, lord_at(Lord::Saturn.index(), i));
        assert!(c.children.is_empty());
    }
    assert_eq!(children[0].start_jd, saturn.start_jd);
    assert_eq!(children[8].end_jd, saturn.end_jd);
}

#[test]
fn every_nakshatra_maps_to_its_lord() {
    for nak in 0u8..27 {
        let lon = (nak as f64 + 0.5) * NAKSHATRA_SPAN_27;
        let ctx = resolve_birth_lord(lon, J2000).unwrap();
        assert_eq!(ctx.nakshatra_index, nak);
        assert_eq!(ctx.start_lord, nakshatra_lord(nak));
        assert_eq!(ctx.start_lord.index(), nak as usize % 9);
        assert!((ctx.fraction_elapsed - 0.5).abs() < 1e-9);
    }
}

#[test]
fn weights_sum_to_full_cycle() {
    let total: u32 = LORD_CYCLE.iter().map(|l| l.years()).sum();
    assert_eq!(total, TOTAL_CYCLE_YEARS);
}

/// Known chart: birth 1990-06-15 08:30 IST, Moon at 115° (Ashlesha).
#[test]
fn birth_chart_cycle_and_current_period() {
    let ist = UtcOffset::from_hours(5.5).unwrap();
    let birth: CivilTime = "1990-06-15 08:30:00".parse().unwrap();
    let birth_jd = jd_from_local(&birth, ist);

    let cycle = dasha_cycle(115.0, birth_jd, 1).unwrap();
    assert_eq!(cycle.birth.nakshatra_name(), "Ashlesha");
    assert_eq!(cycle.birth.start_lord, Lord::Mercury);
    assert!(cycle.mahadashas[0].contains(birth_jd));
    assert_eq!(cycle.mahadashas[1].lord, Lord::Ketu);

    let at: CivilTime = "2024-01-01 00:00:00".parse().unwrap();
    let snap = cycle.active_at(jd_from_local(&at, ist), 3).unwrap();
    assert_eq!(snap.periods.len(), 3);
    assert_eq!(snap.periods[0].lord, Lord::Sun);
    let levels: Vec<DashaLevel> = snap.levels().map(|(l, _)| l).collect();
    assert_eq!(
        levels,
        vec![DashaLevel::Mahadasha, DashaLevel::Bhukti, DashaLevel::Antara]
    );
    for pair in snap.periods.windows(2) {
        assert!(pair[0].start_jd <= pair[1].start_jd);
        assert!(pair[1].end_jd <= pair[0].end_jd);
    }
}

/// The chain through an eager depth-6 tree matches lazy expansion.
#[test]
fn active_chain_agrees_with_full_tree() {
    let eager = build_level(J2000, 20.0, MAX_DASHA_DEPTH, Lord::Venus.index()).unwrap();
    let lazy = build_level(J2000, 20.0, 1, Lord::Venus.index()).unwrap();
    let query = J2000 + 4321.123;

    let a = active_chain(&eager, query, MAX_DASHA_DEPTH).unwrap();
    let b = active_chain(&lazy, query, MAX_DASHA_DEPTH).unwrap();
    assert_eq!(a, b);
    assert_eq!(a.periods.len(), MAX_DASHA_DEPTH as usize);

    // Pranas are the finest level; nothing below them.
    let mut node = &eager[0];
    for _ in 1..MAX_DASHA_DEPTH {
        node = &node.children[0];
    }
    assert!(node.children.is_empty());
}

#[test]
fn report_json_shape() {
    let cfg = DashaConfig::default()
        .with_depth(2)
        .with_offset(UtcOffset::from_hours(5.5).unwrap());
    let report = vimshottari_report(205.0, J2000, &cfg).unwrap();
    let v = serde_json::to_value(&report).unwrap();

    assert_eq!(v["nakshatra_index"], 15);
    assert_eq!(v["nakshatra_name"], "Vishakha");
    assert_eq!(v["start_lord"], "Jupiter");
    let md = v["mahadashas"].as_array().unwrap();
    assert_eq!(md.len(), 9);
    for m in md {
        for key in ["lord", "start", "end", "start_instant", "end_instant"] {
            assert!(m.get(key).is_some(), "missing {key}");
        }
        assert_eq!(m["children"].as_array().unwrap().len(), 9);
        assert!(m["children"][0].get("children").is_none());
    }
}

#[test]
fn subtree_request_round_trip_through_json() {
    let md = compute_mahadashas(J2000, Lord::Rahu).unwrap();
    let req = SubtreeRequest::new(md[0].start_jd, md[0].end_jd, md[0].lord);
    let text = serde_json::to_string(&req).unwrap();
    let parsed: SubtreeRequest = serde_json::from_str(&text).unwrap();
    assert_eq!(parsed, req);

    let children = parsed.resolve().unwrap();
    assert_eq!(children.len(), 9);
    assert_eq!(children[0].lord, Lord::Rahu);
    assert_eq!(children[8].end_jd, md[0].end_jd);
}
