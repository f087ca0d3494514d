use fissura::{
    DomainBounds, Elasticity, Field, FractureConfig, GrowthStatus, PressureLaw, Stratum,
};

fn elasticity() -> Elasticity {
    Elasticity {
        shear_modulus: 1.0e4,
        poisson_ratio: 0.25,
    }
}

fn fracture_config(seed_x: f64, seed_y: f64, seed_beta: f64, growth_steps: usize) -> FractureConfig {
    FractureConfig {
        seed_x,
        seed_y,
        seed_beta,
        half_length: 1.0,
        growth_steps,
        pressure: 1.0,
        pressure_law: PressureLaw::Uniform,
    }
}

fn assert_fields_approx_eq(a: Field, b: Field, tol: f64) {
    assert!((a.sxx - b.sxx).abs() <= tol);
    assert!((a.sxy - b.sxy).abs() <= tol);
    assert!((a.syy - b.syy).abs() <= tol);
    assert!((a.ux - b.ux).abs() <= tol);
    assert!((a.uy - b.uy).abs() <= tol);
}

#[test]
fn empty_stratum_reports_the_background_stress() {
    let mut stratum = Stratum::new(elasticity());
    stratum.set_background_stress(1.0, 0.5, -2.0);

    let field = stratum.field_at(3.0, 4.0);
    assert_eq!(field, Field::from_stress(1.0, 0.5, -2.0));
    assert_eq!(stratum.calculate().unwrap(), vec![]);
}

#[test]
fn fractures_grow_in_sequence_under_prior_fields() {
    let mut stratum = Stratum::new(elasticity());
    stratum.set_background_stress(0.05, 0.0, 0.02);
    stratum.add_fracture(&fracture_config(0.0, 0.0, 0.0, 2));
    stratum.add_fracture(&fracture_config(9.0, 4.0, 0.3, 1));

    let statuses = stratum.calculate().unwrap();
    assert_eq!(statuses, vec![GrowthStatus::Complete, GrowthStatus::Complete]);

    // The second fracture's seed captured the background plus the finished
    // field of the first fracture, which does not change afterwards.
    let first = &stratum.fractures()[0];
    let second = &stratum.fractures()[1];
    let seed = second.breaks().find(|b| b.index() == 0).unwrap();

    let expected = Field::from_stress(0.05, 0.0, 0.02) + first.induced_field_at(9.0, 4.0);
    assert_fields_approx_eq(seed.external_field(), expected, 1e-12);

    // One-directional coupling: the first fracture saw only the background.
    let first_seed = first.breaks().find(|b| b.index() == 0).unwrap();
    assert_eq!(
        first_seed.external_field(),
        Field::from_stress(0.05, 0.0, 0.02)
    );
}

#[test]
fn trace_grid_is_normalized_to_the_expected_headroom() {
    let mut stratum = Stratum::new(elasticity());
    stratum.set_domain(DomainBounds {
        x_min: -10.0,
        x_max: 10.0,
        y_min: -10.0,
        y_max: 10.0,
    });
    stratum.add_fracture(&fracture_config(0.0, 0.0, 0.0, 2));
    stratum.calculate().unwrap();

    let resolution = 31;
    let grid = stratum.trace_grid(resolution);
    assert_eq!(grid.xs.len(), resolution);
    assert_eq!(grid.ys.len(), resolution);
    assert_eq!(grid.values.shape(), (resolution, resolution));

    let max_abs = grid.values.iter().fold(0.0f64, |m, v| m.max(v.abs()));
    assert!((max_abs - 0.9).abs() <= 1e-12);
}

#[test]
fn trace_grid_of_an_unloaded_stratum_is_left_unscaled() {
    let stratum = Stratum::new(elasticity());
    let grid = stratum.trace_grid(5);
    assert!(grid.values.iter().all(|v| *v == 0.0));
}

#[test]
fn principal_direction_glyphs_come_in_mirrored_pairs() {
    let mut stratum = Stratum::new(elasticity());
    stratum.set_domain(DomainBounds {
        x_min: -8.0,
        x_max: 8.0,
        y_min: -8.0,
        y_max: 8.0,
    });
    stratum.add_fracture(&fracture_config(0.0, 0.0, 0.0, 1));
    stratum.calculate().unwrap();

    let samples = stratum.principal_direction_samples(11);
    assert!(!samples.is_empty());
    assert_eq!(samples.len() % 2, 0);
    for pair in samples.chunks_exact(2) {
        let (plus, minus) = (pair[0], pair[1]);
        assert_eq!((plus.x, plus.y), (minus.x, minus.y));
        assert_eq!(plus.dx, -minus.dx);
        assert_eq!(plus.dy, -minus.dy);
    }
}

#[test]
fn fracture_paths_follow_the_chain_order() {
    let mut stratum = Stratum::new(elasticity());
    stratum.add_fracture(&fracture_config(0.0, 0.0, 0.0, 3));
    stratum.calculate().unwrap();

    let paths = stratum.fracture_paths();
    assert_eq!(paths.len(), 1);
    let path = &paths[0];
    assert_eq!(path.len(), 7);
    for window in path.windows(2) {
        assert!(window[0].x < window[1].x);
    }
}
