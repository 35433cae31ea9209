//! Named algebras and irreps that come up constantly: the Lorentz algebra `A1 + A1`, SU(2) irreps
//! by dimension, and the conventional SU(3) names.

use anyhow::{anyhow, bail, Context};

use crate::algebra::{Algebra, Series, SimpleAlgebra};
use crate::irrep::{Irrep, IrrepCounter};
use crate::parser::{parse_algebra, parse_weight};
use crate::weight::Weight;

const A1: SimpleAlgebra = SimpleAlgebra::new_unchecked(Series::A, 1);
const A2: SimpleAlgebra = SimpleAlgebra::new_unchecked(Series::A, 2);

/// Build an irrep from algebra notation and a weight string, e.g. `irrep("SU3 x SU2", "1 0 1")`.
pub fn irrep(algebra: &str, highest_weight: &str) -> anyhow::Result<Irrep> {
    let algebra = parse_algebra(algebra)?;
    let highest_weight = parse_weight(highest_weight)?;
    Irrep::new(algebra, highest_weight).context("Highest weight does not match the algebra")
}

/// The complexified Lorentz algebra `A1 + A1`, left-handed factor first.
pub fn lorentz_algebra() -> Algebra {
    Algebra::Semisimple(vec![A1, A1])
}

/// The Lorentz irrep with the given Dynkin labels, i.e. twice the left and right spins.
pub fn lorentz_irrep(left: i64, right: i64) -> Irrep {
    Irrep::new_unchecked(lorentz_algebra(), Weight::from([left, right]))
}

pub fn scalar() -> Irrep {
    lorentz_irrep(0, 0)
}

pub fn l_spinor() -> Irrep {
    lorentz_irrep(1, 0)
}

pub fn r_spinor() -> Irrep {
    lorentz_irrep(0, 1)
}

pub fn vector() -> Irrep {
    lorentz_irrep(1, 1)
}

pub fn l_tensor() -> Irrep {
    lorentz_irrep(2, 0)
}

pub fn r_tensor() -> Irrep {
    lorentz_irrep(0, 2)
}

const LORENTZ_NAMES: [(&str, [i64; 2]); 6] = [
    ("scalar", [0, 0]),
    ("L_spinor", [1, 0]),
    ("R_spinor", [0, 1]),
    ("vector", [1, 1]),
    ("L_tensor", [2, 0]),
    ("R_tensor", [0, 2]),
];

/// The Lorentz highest weight with the given name, or `None`.
pub fn lorentz_weight(name: &str) -> Option<Weight> {
    LORENTZ_NAMES
        .iter()
        .find(|(n, _)| *n == name)
        .map(|(_, w)| Weight::from(*w))
}

/// Parse a Lorentz irrep given either by name (`"L_spinor"`) or as Dynkin labels (`"1 0"`).
pub fn parse_lorentz(code: &str) -> anyhow::Result<Irrep> {
    let code = code.trim();
    let weight = match lorentz_weight(code) {
        Some(weight) => weight,
        None if code.chars().any(|c| c.is_alphabetic()) => {
            bail!("Unknown Lorentz irrep '{code}'")
        }
        None => parse_weight(code)?,
    };
    Irrep::new(lorentz_algebra(), weight)
        .with_context(|| format!("Invalid Lorentz irrep '{code}'"))
}

pub fn su2_algebra() -> Algebra {
    A1.into()
}

/// The SU(2) irrep of the given dimension, which must be positive.
pub fn su2_irrep(dimension: i64) -> crate::Result<Irrep> {
    Irrep::new(su2_algebra(), Weight::from([dimension - 1]))
}

/// The SU(2) irrep with Dynkin label `label`, i.e. twice the spin.
pub fn su2_dynkin(label: u32) -> Irrep {
    Irrep::new_unchecked(su2_algebra(), Weight::from([i64::from(label)]))
}

pub fn su3_algebra() -> Algebra {
    A2.into()
}

/// The SU(3) irrep with Dynkin labels `(a, b)`.
pub fn su3_dynkin(a: u32, b: u32) -> Irrep {
    Irrep::new_unchecked(su3_algebra(), Weight::from([i64::from(a), i64::from(b)]))
}

const SU3_NAMES: [(&str, [u32; 2]); 10] = [
    ("1", [0, 0]),
    ("3", [1, 0]),
    ("6", [2, 0]),
    ("8", [1, 1]),
    ("10", [3, 0]),
    ("15", [2, 1]),
    ("15'", [4, 0]),
    ("21", [0, 5]),
    ("24", [1, 3]),
    ("27", [2, 2]),
];

/// The SU(3) irrep with a conventional name such as `"8"`, `"15'"` or `"6*"`.
pub fn su3_irrep(name: &str) -> anyhow::Result<Irrep> {
    let (base, conjugate) = match name.strip_suffix('*') {
        Some(base) => (base, true),
        None => (name, false),
    };
    let [a, b] = SU3_NAMES
        .iter()
        .find(|(n, _)| *n == base)
        .map(|(_, w)| *w)
        .ok_or_else(|| anyhow!("Unknown SU(3) irrep name '{name}'"))?;
    let irrep = su3_dynkin(a, b);
    Ok(if conjugate { irrep.conjugate() } else { irrep })
}

/// The conventional name of an SU(3) irrep, if it has one.
pub fn su3_name(irrep: &Irrep) -> Option<String> {
    if irrep.algebra() != &su3_algebra() {
        return None;
    }
    let weight = irrep.highest_weight().components();
    SU3_NAMES.iter().find_map(|(name, w)| {
        let [a, b] = w.map(i64::from);
        if [a, b][..] == *weight {
            Some(name.to_string())
        } else if [b, a][..] == *weight {
            Some(format!("{name}*"))
        } else {
            None
        }
    })
}

/// Render a sum of SU(3) irreps with conventional names, e.g. `3 + (2) 8`.
pub fn su3_show(irreps: &IrrepCounter) -> String {
    irreps
        .iter()
        .map(|(irrep, count)| {
            let name = su3_name(irrep).unwrap_or_else(|| irrep.to_string());
            if count > 1 {
                format!("({count}) {name}")
            } else {
                name
            }
        })
        .collect::<Vec<_>>()
        .join(" + ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::LieError;
    use crate::multiset::Multiset;
    use expect_test::{expect, Expect};

    fn product(a: &str, b: &str) -> IrrepCounter {
        let a = su3_irrep(a).unwrap();
        let b = su3_irrep(b).unwrap();
        (*a.multiply(&b).unwrap()).clone()
    }

    #[test]
    fn test_su3_products() {
        let check = |a, b, output: Expect| {
            output.assert_eq(&su3_show(&product(a, b)));
        };

        check("3*", "3*", expect![[r#"6* + 3"#]]);
        check("3", "3*", expect![[r#"1 + 8"#]]);
        check("6", "3", expect![[r#"8 + 10"#]]);
        check("6", "3*", expect![[r#"3 + 15"#]]);
        check("6", "6", expect![[r#"6* + 15 + 15'"#]]);
        check("6", "6*", expect![[r#"1 + 8 + 27"#]]);
        check("8", "3", expect![[r#"6* + 3 + 15"#]]);
        check("8", "6*", expect![[r#"6* + 3 + 24 + 15"#]]);
        check("8", "8", expect![[r#"1 + 10* + (2) 8 + 27 + 10"#]]);
    }

    #[test]
    fn test_su3_products_match_names() {
        let names = |list: &[&str]| -> IrrepCounter {
            Multiset::from_elements(list.iter().map(|n| su3_irrep(n).unwrap()))
        };
        assert_eq!(product("8", "8"), names(&["1", "8", "8", "10", "10*", "27"]));
        assert_eq!(product("6", "6"), names(&["6*", "15", "15'"]));
    }

    #[test]
    fn test_su3_names() {
        assert_eq!(su3_irrep("15'").unwrap().highest_weight(), &Weight::from([4, 0]));
        assert_eq!(su3_irrep("6*").unwrap(), su3_dynkin(0, 2));
        assert_eq!(su3_name(&su3_irrep("21*").unwrap()).as_deref(), Some("21*"));
        assert_eq!(su3_name(&su2_dynkin(1)), None);
        assert!(su3_irrep("7").is_err());
    }

    #[test]
    fn test_su2_irrep() {
        assert_eq!(su2_irrep(3).unwrap(), su2_dynkin(2));
        assert_eq!(su2_irrep(1).unwrap().dimension().unwrap(), 1);
        assert_eq!(
            su2_irrep(0),
            Err(LieError::NonDominantWeight { weight: Weight::from([-1]) })
        );
    }

    #[test]
    fn test_lorentz() {
        assert_eq!(parse_lorentz("vector").unwrap(), vector());
        assert_eq!(parse_lorentz("0 2").unwrap(), r_tensor());
        assert!(parse_lorentz("1").is_err());
        expect![[r#"Unknown Lorentz irrep 'tensor'"#]]
            .assert_eq(&parse_lorentz(" tensor ").unwrap_err().to_string());
        assert_eq!(vector().dimension().unwrap(), 4);
        assert_eq!(l_tensor().dimension().unwrap(), 3);
        assert_eq!(l_spinor().conjugate(), l_spinor());
    }

    #[test]
    fn test_irrep_shortcut() {
        let quark = irrep("SU3 x SU2", "1 0 1").unwrap();
        assert_eq!(quark.dimension().unwrap(), 6);
        assert_eq!(quark.to_string(), "A2(1 0) x A1(1)");
        assert!(irrep("SU3", "1").is_err());
    }
}
