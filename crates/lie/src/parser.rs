//! Parsers for the textual notation of algebras and weights.
//!
//! Algebras are written either in algebra style, as a `+`-separated list of simple algebras such
//! as `A3 + F4 + B2`, or in group style, as an `x`-separated list of classical groups such as
//! `SU3 x SU2 x Sp4`. The two styles cannot be mixed. A single term may use either style.

use anyhow::{anyhow, bail, Context};
use nom::{
    branch::alt,
    bytes::complete::tag,
    character::complete::{char, digit1 as digit, one_of, space0},
    combinator::{map, map_opt, map_res, opt, recognize},
    error::{context, ParseError, VerboseError},
    multi::{many0, separated_list1},
    sequence::{delimited, pair},
    IResult as IResultBase, Parser,
};
use std::str::FromStr;

use crate::algebra::{Algebra, Series, SimpleAlgebra};
use crate::weight::Weight;

type IResult<I, O> = IResultBase<I, O, VerboseError<I>>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Group {
    Unitary,
    Orthogonal,
    Symplectic,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Term {
    Simple(Series, usize),
    Group(Group, usize),
    Lorentz,
}

/// Pad both ends with whitespace
fn space<'a, O, E: ParseError<&'a str>, F: Parser<&'a str, O, E>>(
    f: F,
) -> impl FnMut(&'a str) -> IResultBase<&'a str, O, E> {
    delimited(space0, f, space0)
}

fn digits<T: FromStr>(i: &str) -> IResult<&str, T> {
    map_res(digit, FromStr::from_str)(i)
}

fn integer(i: &str) -> IResult<&str, i64> {
    map_res(recognize(pair(opt(char('-')), digit)), FromStr::from_str)(i)
}

fn simple_term(i: &str) -> IResult<&str, Term> {
    context(
        "simple algebra",
        map(
            pair(map_opt(one_of("ABCDEFG"), Series::from_char), digits),
            |(series, rank)| Term::Simple(series, rank),
        ),
    )(i)
}

fn group_term(i: &str) -> IResult<&str, Term> {
    let group = alt((
        map(tag("SU"), |_| Group::Unitary),
        map(tag("SO"), |_| Group::Orthogonal),
        map(tag("Sp"), |_| Group::Symplectic),
    ));
    context(
        "classical group",
        alt((
            map(alt((tag("Lorentz"), tag("lorentz"))), |_| Term::Lorentz),
            map(pair(group, digits), |(group, n)| Term::Group(group, n)),
        )),
    )(i)
}

fn convert_error(i: &str) -> impl FnOnce(nom::Err<VerboseError<&str>>) -> anyhow::Error + '_ {
    move |err| {
        anyhow!(match err {
            nom::Err::Error(e) | nom::Err::Failure(e) => nom::error::convert_error(i, e),
            _ => format!("{err:#}"),
        })
    }
}

/// Run `parser` on the whole of `i`.
fn parse_all<'a, O>(
    i: &'a str,
    what: &str,
    mut parser: impl FnMut(&'a str) -> IResult<&'a str, O>,
) -> anyhow::Result<O> {
    let (rest, output) = parser(i)
        .map_err(convert_error(i))
        .with_context(|| format!("Error when parsing {what} string '{i}'"))?;
    if rest.is_empty() {
        Ok(output)
    } else {
        Err(anyhow!(
            "Failed to consume all of {what} string '{i}'. Remaining: '{rest}'"
        ))
    }
}

fn term_factors(term: Term) -> anyhow::Result<Vec<SimpleAlgebra>> {
    let a1 = SimpleAlgebra::new_unchecked(Series::A, 1);
    let (series, rank) = match term {
        Term::Simple(series, rank) => (series, rank),
        Term::Lorentz | Term::Group(Group::Orthogonal, 4) => return Ok(vec![a1, a1]),
        Term::Group(Group::Unitary, n) => (Series::A, n.saturating_sub(1)),
        Term::Group(Group::Orthogonal, n) if n % 2 == 1 => (Series::B, n / 2),
        Term::Group(Group::Orthogonal, n) => (Series::D, n / 2),
        Term::Group(Group::Symplectic, n) if n % 2 == 0 => (Series::C, n / 2),
        Term::Group(Group::Symplectic, n) => {
            bail!("Sp({n}) is not defined: the dimension must be even")
        }
    };
    Ok(vec![SimpleAlgebra::new(series, rank)?])
}

/// Parse algebra notation such as `"SU3 x SU2"` or `"A2 + A1"`.
pub fn parse_algebra(i: &str) -> anyhow::Result<Algebra> {
    let code = i.trim();
    let terms = match (code.contains('+'), code.contains('x')) {
        (true, true) => bail!("Mixed algebra-style and group-style notation in '{code}'"),
        (true, false) => parse_all(
            code,
            "algebra",
            separated_list1(char('+'), space(simple_term)),
        )?,
        (false, true) => parse_all(
            code,
            "algebra",
            separated_list1(char('x'), space(group_term)),
        )?,
        (false, false) => vec![parse_all(code, "algebra", alt((simple_term, group_term)))?],
    };

    let mut factors = Vec::new();
    for term in terms {
        factors.extend(term_factors(term).with_context(|| format!("Invalid algebra '{code}'"))?);
    }
    Ok(Algebra::from_factors(factors))
}

/// Parse a space separated list of Dynkin labels, such as `"1 0 -2"`.
pub fn parse_weight(i: &str) -> anyhow::Result<Weight> {
    let components = parse_all(i, "weight", many0(space(integer)))?;
    Ok(Weight::new(components))
}
