// Copyright (c) The Crucible Authors.
// SPDX-License-Identifier: Apache-2.0
// https://github.com/crucible-pm/crucible

//! Parser combinators for package coordinates.
//!
//! A reference has the form `name/version@user/channel`. Each of the four
//! segments must be non-empty and must not contain `/`, `@` or whitespace.

use nom::Parser;
use nom::bytes::complete::take_while1;
use nom::character::complete::char;
use nom::combinator::{all_consuming, map};
use nom::error::{ContextError, ParseError};
use nom::sequence::tuple;
use nom::IResult;
use nom_supreme::tag::TagError;

use crate::Reference;

fn is_segment_char(c: char) -> bool {
    !c.is_whitespace() && c != '/' && c != '@'
}

fn segment<'a, E>(input: &'a str) -> IResult<&'a str, &'a str, E>
where
    E: ParseError<&'a str> + ContextError<&'a str> + TagError<&'a str, &'static str>,
{
    take_while1(is_segment_char)(input)
}

/// Parse a full `name/version@user/channel` reference.
pub fn reference<'a, E>(input: &'a str) -> IResult<&'a str, Reference, E>
where
    E: ParseError<&'a str> + ContextError<&'a str> + TagError<&'a str, &'static str>,
{
    all_consuming(map(
        tuple((
            segment,
            char('/'),
            segment,
            char('@'),
            segment,
            char('/'),
            segment,
        )),
        |(name, _, version, _, user, _, channel)| Reference {
            name: name.to_owned(),
            version: crate::Version::new(version),
            user: user.to_owned(),
            channel: channel.to_owned(),
        },
    ))
    .parse(input)
}
