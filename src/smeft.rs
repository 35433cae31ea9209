//! The field content of the Standard Model, for building the Standard Model EFT.
//!
//! Fermions are left-handed `Q`, `L` doublets and right-handed `u`, `d`, `e` singlets, each with
//! its conjugate. Every fermion comes in a configurable number of flavors.

use std::collections::BTreeMap;

use lie::shortcuts::{l_spinor, r_spinor, scalar, su2_algebra, su2_dynkin, su3_algebra, su3_dynkin};
use lie::{Algebra, Irrep, Statistics};
use num_rational::Rational64;

use crate::eft::Eft;
use crate::field::Field;

/// `SU3 x SU2`. Hypercharge is carried by the fields' charges.
pub fn sm_gauge_algebra() -> Algebra {
    su3_algebra() + su2_algebra()
}

/// The `SU3 x SU2` irrep with the given SU(3) and SU(2) Dynkin labels.
fn sm_irrep((a, b): (u32, u32), su2_label: u32) -> Irrep {
    su3_dynkin(a, b).direct_sum(&su2_dynkin(su2_label))
}

fn hypercharge(numerator: i64, denominator: i64) -> Vec<Rational64> {
    vec![Rational64::new(numerator, denominator)]
}

pub fn phi() -> Field {
    Field::from_irreps("phi", scalar(), sm_irrep((0, 0), 1)).with_charges(hypercharge(1, 2))
}

pub fn phic() -> Field {
    phi().conjugate()
}

fn field_strength(name: &str, internal: Irrep) -> (Field, Field) {
    Field::strength_tensors(name, internal, hypercharge(0, 1))
}

pub fn bl() -> Field {
    field_strength("B", sm_irrep((0, 0), 0)).0
}

pub fn br() -> Field {
    field_strength("B", sm_irrep((0, 0), 0)).1
}

pub fn wl() -> Field {
    field_strength("W", sm_irrep((0, 0), 2)).0
}

pub fn wr() -> Field {
    field_strength("W", sm_irrep((0, 0), 2)).1
}

pub fn gl() -> Field {
    field_strength("G", sm_irrep((1, 1), 0)).0
}

pub fn gr() -> Field {
    field_strength("G", sm_irrep((1, 1), 0)).1
}

fn fermion(name: &str, lorentz: Irrep, internal: Irrep, charges: Vec<Rational64>) -> Field {
    Field::from_irreps(name, lorentz, internal)
        .with_charges(charges)
        .with_statistics(Statistics::Fermion)
        .with_dimension(Rational64::new(3, 2))
}

pub fn q(flavors: usize) -> Field {
    fermion("Q", l_spinor(), sm_irrep((1, 0), 1), hypercharge(1, 6)).with_flavors(flavors)
}

pub fn qc(flavors: usize) -> Field {
    q(flavors).conjugate()
}

pub fn u(flavors: usize) -> Field {
    fermion("u", r_spinor(), sm_irrep((1, 0), 0), hypercharge(2, 3)).with_flavors(flavors)
}

pub fn uc(flavors: usize) -> Field {
    u(flavors).conjugate()
}

pub fn d(flavors: usize) -> Field {
    fermion("d", r_spinor(), sm_irrep((1, 0), 0), hypercharge(-1, 3)).with_flavors(flavors)
}

pub fn dc(flavors: usize) -> Field {
    d(flavors).conjugate()
}

pub fn l(flavors: usize) -> Field {
    fermion("L", l_spinor(), sm_irrep((0, 0), 1), hypercharge(-1, 2)).with_flavors(flavors)
}

pub fn lc(flavors: usize) -> Field {
    l(flavors).conjugate()
}

pub fn e(flavors: usize) -> Field {
    fermion("e", r_spinor(), sm_irrep((0, 0), 0), hypercharge(-1, 1)).with_flavors(flavors)
}

pub fn ec(flavors: usize) -> Field {
    e(flavors).conjugate()
}

pub fn scalars() -> Vec<Field> {
    vec![phi(), phic()]
}

pub fn field_strengths() -> Vec<Field> {
    vec![bl(), br(), wl(), wr(), gl(), gr()]
}

pub fn fermions(flavors: usize) -> Vec<Field> {
    [q, qc, u, uc, d, dc, l, lc, e, ec]
        .iter()
        .map(|field| field(flavors))
        .collect()
}

/// Field name to class: `phi` for scalars, `F` for field strengths and `psi` for fermions.
pub fn field_classes() -> BTreeMap<String, String> {
    let classes = [
        (scalars(), "phi"),
        (field_strengths(), "F"),
        (fermions(1), "psi"),
    ];
    classes
        .into_iter()
        .flat_map(|(fields, class)| {
            fields
                .into_iter()
                .map(move |field| (field.name().to_owned(), class.to_owned()))
        })
        .collect()
}

/// The Standard Model EFT with `flavors` fermion generations.
pub fn smeft(flavors: usize) -> anyhow::Result<Eft> {
    let mut fields = scalars();
    fields.extend(field_strengths());
    fields.extend(fermions(flavors));
    Eft::new(sm_gauge_algebra(), fields)
}

#[cfg(test)]
mod tests {
    use super::*;
    use expect_test::expect;

    #[test]
    fn test_field_names() {
        let mut fields = scalars();
        fields.extend(field_strengths());
        fields.extend(fermions(1));
        let names: Vec<_> = fields.iter().map(Field::name).collect();
        expect![[r#"phi phic BL BR WL WR GL GR Q Qc u uc d dc L Lc e ec"#]]
            .assert_eq(&names.join(" "));
    }

    #[test]
    fn test_conjugates() {
        assert_eq!(phic().charges(), &[Rational64::new(-1, 2)]);
        assert_eq!(qc(1).internal(), &sm_irrep((0, 1), 1));
        assert_eq!(qc(1).lorentz(), &r_spinor());
        assert_eq!(br().lorentz(), &lie::shortcuts::r_tensor());
        assert_eq!(gr().internal(), gl().internal());
        assert_eq!(ec(3).flavors(), 3);
        assert_eq!(ec(3).charges(), &[Rational64::from_integer(1)]);
    }

    #[test]
    fn test_hypercharges_cancel_in_yukawas() {
        let sum = |fields: &[Field]| -> Rational64 { fields.iter().map(|f| f.charges()[0]).sum() };
        assert_eq!(sum(&[qc(1), u(1), phic()]), Rational64::from_integer(0));
        assert_eq!(sum(&[qc(1), d(1), phi()]), Rational64::from_integer(0));
        assert_eq!(sum(&[lc(1), e(1), phi()]), Rational64::from_integer(0));
    }

    #[test]
    fn test_field_classes() {
        let classes = field_classes();
        assert_eq!(classes.len(), 18);
        assert_eq!(classes["phic"], "phi");
        assert_eq!(classes["WR"], "F");
        assert_eq!(classes["Lc"], "psi");
    }
}
