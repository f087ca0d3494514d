use fissura::{Break, Elasticity, Field};

use matrixcompare::assert_matrix_eq;
use nalgebra::Matrix2;
use std::f64::consts::PI;

fn elasticity() -> Elasticity {
    Elasticity {
        shear_modulus: 1.0e4,
        poisson_ratio: 0.25,
    }
}

fn pressurized_break(index: i32, half_length: f64, cx: f64, cy: f64, beta: f64) -> Break {
    Break::new(index, half_length, cx, cy, beta, elasticity(), 0.0, -1.0)
}

#[test]
fn self_influence_matches_closed_form() {
    // At its own center a constant-DD element induces the normal (shear)
    // traction G / (pi a (1 - nu)) per unit dn (ds), with no cross coupling.
    let e = elasticity();
    let a = 1.5;
    let brk = pressurized_break(0, a, 3.0, -2.0, 0.7);

    let diagonal = e.shear_modulus / (PI * a * (1.0 - e.poisson_ratio));
    let expected = Matrix2::new(diagonal, 0.0, 0.0, diagonal);
    let block = brk.influence_on(&brk);
    assert_matrix_eq!(block, expected, comp = abs, tol = 1e-9 * diagonal);
}

#[test]
fn influence_is_frame_objective() {
    // Rigidly rotating the whole two-element configuration about the origin
    // must leave the influence block unchanged.
    let a = 1.0;
    let source = pressurized_break(0, a, 0.0, 0.0, 0.2);
    let receiver = pressurized_break(1, a, 3.0, 1.0, -0.4);
    let reference = source.influence_on(&receiver);

    let phi: f64 = 1.1;
    let (sin, cos) = phi.sin_cos();
    let rotate = |x: f64, y: f64| (x * cos - y * sin, x * sin + y * cos);

    let (sx, sy) = rotate(source.cx(), source.cy());
    let (rx, ry) = rotate(receiver.cx(), receiver.cy());
    let source_rot = pressurized_break(0, a, sx, sy, source.beta() + phi);
    let receiver_rot = pressurized_break(1, a, rx, ry, receiver.beta() + phi);

    let rotated = source_rot.influence_on(&receiver_rot);
    assert_matrix_eq!(rotated, reference, comp = abs, tol = 1e-9);
}

#[test]
fn induced_stress_decays_with_distance() {
    let mut brk = pressurized_break(0, 1.0, 0.0, 0.0, 0.0);
    brk.set_discontinuities(0.0, -1e-3);

    let near = brk.induced_field_at(5.0, 0.0);
    let far = brk.induced_field_at(50.0, 0.0);
    assert!(near.syy.abs() > 0.0);
    // The stress field of a finite discontinuity decays like 1/r^2.
    assert!(far.syy.abs() < near.syy.abs() / 50.0);
}

#[test]
fn opening_element_jumps_in_normal_displacement() {
    // The displacement discontinuity is the jump uy(0-) - uy(0+) = dn, so an
    // opening element (dn < 0) moves its faces apart.
    let dn = -1e-3;
    let mut brk = pressurized_break(0, 1.0, 0.0, 0.0, 0.0);
    brk.set_discontinuities(0.0, dn);

    let eps = 1e-8;
    let above = brk.induced_field_at(0.0, eps);
    let below = brk.induced_field_at(0.0, -eps);
    let jump = below.uy - above.uy;
    assert!((jump - dn).abs() <= 1e-6 * dn.abs());
    assert!(above.uy > 0.0 && below.uy < 0.0);
}

#[test]
fn opening_element_induces_tension_ahead_of_its_tips() {
    let mut brk = pressurized_break(0, 1.0, 0.0, 0.0, 0.0);
    brk.set_discontinuities(0.0, -1e-3);

    // Collinear points just beyond the tips see tensile normal stress, which
    // is what drives in-plane propagation.
    let ahead = brk.induced_field_at(2.0, 0.0);
    assert!(ahead.syy > 0.0);
    let behind = brk.induced_field_at(-2.0, 0.0);
    assert!(behind.syy > 0.0);
    assert!((ahead.syy - behind.syy).abs() <= 1e-12);
}

#[test]
fn rhs_subtracts_external_traction_projection() {
    let mut brk = pressurized_break(0, 1.0, 0.0, 0.0, 0.0);
    brk.set_external_field(Field::from_stress(5.0, 0.25, -2.0));

    // Axis-aligned element: the local shear/normal tractions are sxy and syy.
    let rhs = brk.rhs();
    assert_eq!(rhs.x, 0.0 - 0.25);
    assert_eq!(rhs.y, -1.0 - (-2.0));
}

#[test]
fn rhs_projects_external_field_into_the_element_frame() {
    let beta = 0.6;
    let external = Field::from_stress(5.0, 0.25, -2.0);
    let mut brk = pressurized_break(0, 1.0, 0.0, 0.0, beta);
    brk.set_external_field(external);

    let local = external.in_rotated_axes(beta);
    let rhs = brk.rhs();
    assert!((rhs.x - (0.0 - local.sxy)).abs() <= 1e-15);
    assert!((rhs.y - (-1.0 - local.syy)).abs() <= 1e-15);
}
