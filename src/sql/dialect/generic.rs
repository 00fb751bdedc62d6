//! Generic base dialect.
//!
//! The base has no override entries: its tables are the fallbacks every
//! lookup ends in. The canonical function constructors live here.

use std::sync::Arc;

use once_cell::sync::Lazy;

use super::{DialectBuilder, DialectDescriptor, FunctionBuilder};
use crate::sql::expr::{Expr, Literal, NodeKind};
use crate::sql::parser::ParseError;

pub(super) static GENERIC: Lazy<Arc<DialectDescriptor>> =
    Lazy::new(|| Arc::new(DialectBuilder::new("generic").assemble()));

/// Base constructor for an upper-cased surface function name.
pub fn base_function(upper: &str) -> Option<FunctionBuilder> {
    let build: FunctionBuilder = match upper {
        "LEVENSHTEIN" => build_levenshtein,
        "GROUP_CONCAT" => build_group_concat,
        "LEAST" => build_least,
        "GREATEST" => build_greatest,
        "DATE_ADD" => build_date_add,
        "JSON_EXTRACT" => build_json_extract,
        "JSON_EXTRACT_SCALAR" => build_json_extract_scalar,
        "JSONB_EXTRACT" => build_jsonb_extract,
        "JSONB_EXTRACT_SCALAR" => build_jsonb_extract_scalar,
        "DATE_STR_TO_DATE" => build_date_str_to_date,
        "TIME_STR_TO_TIME" => build_time_str_to_time,
        _ => return None,
    };
    Some(build)
}

/// Constructor producing nodes of `kind`, for function aliases declared by
/// name.
pub fn constructor_for(kind: NodeKind) -> Option<FunctionBuilder> {
    let build: FunctionBuilder = match kind {
        NodeKind::Levenshtein => build_levenshtein,
        NodeKind::GroupConcat => build_group_concat,
        NodeKind::Least => build_least,
        NodeKind::Greatest => build_greatest,
        NodeKind::DateAdd => build_date_add,
        NodeKind::JsonExtract => build_json_extract,
        NodeKind::JsonExtractScalar => build_json_extract_scalar,
        NodeKind::JsonbExtract => build_jsonb_extract,
        NodeKind::JsonbExtractScalar => build_jsonb_extract_scalar,
        NodeKind::DateStrToDate => build_date_str_to_date,
        NodeKind::TimeStrToTime => build_time_str_to_time,
        _ => return None,
    };
    Some(build)
}

fn check_arity(
    function: &str,
    args: &[Expr],
    min: usize,
    max: Option<usize>,
) -> Result<(), ParseError> {
    let n = args.len();
    let too_many = max.is_some_and(|max| n > max);
    if n >= min && !too_many {
        return Ok(());
    }
    let expected = match max {
        Some(max) if max == min => format!("{min}"),
        Some(max) => format!("{min} to {max}"),
        None => format!("at least {min}"),
    };
    Err(ParseError::InvalidArguments {
        function: function.to_string(),
        message: format!("expected {expected} arguments, got {n}"),
    })
}

fn missing(function: &str) -> ParseError {
    ParseError::InvalidArguments {
        function: function.to_string(),
        message: "missing argument".into(),
    }
}

pub(crate) fn build_levenshtein(args: Vec<Expr>) -> Result<Expr, ParseError> {
    check_arity("LEVENSHTEIN", &args, 2, None)?;
    Ok(Expr::Levenshtein { args })
}

fn build_group_concat(args: Vec<Expr>) -> Result<Expr, ParseError> {
    check_arity("GROUP_CONCAT", &args, 1, Some(2))?;
    let mut args = args.into_iter();
    let Some(this) = args.next() else {
        return Err(missing("GROUP_CONCAT"));
    };
    Ok(Expr::GroupConcat {
        this: Box::new(this),
        separator: args.next().map(Box::new),
    })
}

fn build_least(args: Vec<Expr>) -> Result<Expr, ParseError> {
    check_arity("LEAST", &args, 1, None)?;
    Ok(Expr::Least { args })
}

fn build_greatest(args: Vec<Expr>) -> Result<Expr, ParseError> {
    check_arity("GREATEST", &args, 1, None)?;
    Ok(Expr::Greatest { args })
}

/// `DATE_ADD(this, amount[, unit])`; the unit is a bare word or a string.
fn build_date_add(args: Vec<Expr>) -> Result<Expr, ParseError> {
    check_arity("DATE_ADD", &args, 2, Some(3))?;
    let mut args = args.into_iter();
    let (Some(this), Some(expression)) = (args.next(), args.next()) else {
        return Err(missing("DATE_ADD"));
    };
    let unit = match args.next() {
        None => None,
        Some(Expr::Column { table: None, name }) => Some(name.name),
        Some(Expr::Literal(Literal::String(s))) => Some(s),
        Some(_) => {
            return Err(ParseError::InvalidArguments {
                function: "DATE_ADD".into(),
                message: "unit must be a word or a string".into(),
            })
        }
    };
    Ok(Expr::DateAdd {
        this: Box::new(this),
        expression: Box::new(expression),
        unit,
    })
}

/// Two-argument JSON extraction. More paths keep the plain call form.
fn json_pair(
    function: &str,
    args: Vec<Expr>,
    make: fn(Box<Expr>, Box<Expr>) -> Expr,
) -> Result<Expr, ParseError> {
    check_arity(function, &args, 2, None)?;
    if args.len() > 2 {
        return Ok(Expr::Function {
            name: function.to_string(),
            args,
        });
    }
    let mut args = args.into_iter();
    let (Some(this), Some(path)) = (args.next(), args.next()) else {
        return Err(missing(function));
    };
    Ok(make(Box::new(this), Box::new(path)))
}

fn build_json_extract(args: Vec<Expr>) -> Result<Expr, ParseError> {
    json_pair("JSON_EXTRACT", args, |this, path| Expr::JsonExtract { this, path })
}

fn build_json_extract_scalar(args: Vec<Expr>) -> Result<Expr, ParseError> {
    json_pair("JSON_EXTRACT_SCALAR", args, |this, path| {
        Expr::JsonExtractScalar { this, path }
    })
}

fn build_jsonb_extract(args: Vec<Expr>) -> Result<Expr, ParseError> {
    json_pair("JSONB_EXTRACT", args, |this, path| Expr::JsonbExtract { this, path })
}

fn build_jsonb_extract_scalar(args: Vec<Expr>) -> Result<Expr, ParseError> {
    json_pair("JSONB_EXTRACT_SCALAR", args, |this, path| {
        Expr::JsonbExtractScalar { this, path }
    })
}

fn single(function: &str, args: Vec<Expr>) -> Result<Box<Expr>, ParseError> {
    check_arity(function, &args, 1, Some(1))?;
    args.into_iter()
        .next()
        .map(Box::new)
        .ok_or_else(|| missing(function))
}

fn build_date_str_to_date(args: Vec<Expr>) -> Result<Expr, ParseError> {
    Ok(Expr::DateStrToDate {
        this: single("DATE_STR_TO_DATE", args)?,
    })
}

fn build_time_str_to_time(args: Vec<Expr>) -> Result<Expr, ParseError> {
    Ok(Expr::TimeStrToTime {
        this: single("TIME_STR_TO_TIME", args)?,
    })
}
