// Copyright (c) The unmangle contributors.
// Licensed under the MIT License.

use super::normalize;
use umc_frontend::resolve::NameStyle;

#[test]
fn whitespace_becomes_camel_boundaries() {
    assert_eq!(normalize("user id", NameStyle::Camel), "userId");
    assert_eq!(normalize("get-value", NameStyle::Camel), "getValue");
    assert_eq!(normalize("a.b.c", NameStyle::Camel), "aBC");
}

#[test]
fn camel_boundaries_are_preserved() {
    assert_eq!(normalize("UserID", NameStyle::Camel), "userId");
    assert_eq!(normalize("parseURL", NameStyle::Camel), "parseUrl");
}

#[test]
fn styles_are_applied() {
    assert_eq!(normalize("http server", NameStyle::Pascal), "HttpServer");
    assert_eq!(normalize("max value", NameStyle::UpperSnake), "MAX_VALUE");
    assert_eq!(normalize("maxValue", NameStyle::UpperSnake), "MAX_VALUE");
}

#[test]
fn leading_underscores_are_preserved() {
    assert_eq!(normalize("_private thing", NameStyle::Camel), "_privateThing");
    assert_eq!(normalize("__proto", NameStyle::Camel), "__proto");
}

#[test]
fn leading_digits_gain_a_prefix() {
    assert_eq!(normalize("123abc", NameStyle::Camel), "_123abc");
}

#[test]
fn reserved_words_gain_a_prefix() {
    assert_eq!(normalize("class", NameStyle::Camel), "_class");
    assert_eq!(normalize("new", NameStyle::Camel), "_new");
}

#[test]
fn empty_normalization_uses_the_placeholder() {
    assert_eq!(normalize("", NameStyle::Camel), "renamed");
    assert_eq!(normalize("!!!", NameStyle::Camel), "renamed");
}

#[test]
fn punctuation_is_stripped() {
    assert_eq!(normalize("foo!!!", NameStyle::Camel), "foo");
    assert_eq!(normalize("a, b", NameStyle::Camel), "aB");
}
