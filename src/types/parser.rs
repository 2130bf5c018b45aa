// Thu Feb 12 2026 - Alex

use crate::symbol::{SymTag, SymbolRef};
use crate::types::factory::TypeFactory;
use crate::types::{BaseType, TypeError, TypeInfo};
use std::iter::Peekable;
use std::str::Chars;
use std::sync::Arc;

/// One declarator suffix token. Precedence: groups bind tightest, array
/// dimensions bind to the immediately preceding base or group
/// (right-to-left among themselves), pointer markers apply to
/// everything to their right.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Suffix {
    Pointer,
    Array(usize),
    Group(Vec<Suffix>),
}

/// Splits a type expression into its base name and suffix tokens.
pub(crate) fn parse_expression(expr: &str) -> Result<(String, Vec<Suffix>), TypeError> {
    let expr = expr.trim();
    let split = expr
        .find(|c| matches!(c, '*' | '[' | '('))
        .unwrap_or(expr.len());
    let (name, suffix) = expr.split_at(split);

    if name.is_empty() || name.contains([')', ']']) {
        return Err(TypeError::InvalidTypeExpression(expr.to_string()));
    }

    let mut chars = suffix.chars().peekable();
    let tokens = tokenize(&mut chars, expr, false)?;
    Ok((name.to_string(), tokens))
}

fn tokenize(
    chars: &mut Peekable<Chars>,
    expr: &str,
    nested: bool,
) -> Result<Vec<Suffix>, TypeError> {
    let invalid = || TypeError::InvalidTypeExpression(expr.to_string());
    let mut tokens = Vec::new();

    while let Some(&c) = chars.peek() {
        match c {
            '*' => {
                chars.next();
                tokens.push(Suffix::Pointer);
            }
            '[' => {
                chars.next();
                let mut digits = String::new();
                while let Some(&d) = chars.peek() {
                    if d.is_ascii_digit() {
                        digits.push(d);
                        chars.next();
                    } else {
                        break;
                    }
                }
                if chars.next() != Some(']') || digits.is_empty() {
                    return Err(invalid());
                }
                let count: usize = digits.parse().map_err(|_| invalid())?;
                tokens.push(Suffix::Array(count));
            }
            '(' => {
                chars.next();
                tokens.push(Suffix::Group(tokenize(chars, expr, true)?));
            }
            ')' => {
                if nested {
                    chars.next();
                    return Ok(tokens);
                }
                return Err(invalid());
            }
            _ => return Err(invalid()),
        }
    }

    if nested {
        // unclosed group
        return Err(invalid());
    }
    Ok(tokens)
}

/// Wraps `lowest` with the parsed suffixes. Pointer markers wrap first
/// (innermost), array dimensions wrap the result right-to-left, and a
/// parenthesized group wraps whatever the outer suffix produced.
pub(crate) fn apply_suffixes(
    lowest: Arc<TypeInfo>,
    tokens: &[Suffix],
    expr: &str,
) -> Result<Arc<TypeInfo>, TypeError> {
    let invalid = || TypeError::InvalidTypeExpression(expr.to_string());

    let mut group: Option<&[Suffix]> = None;
    let mut pointers = 0usize;
    let mut arrays = Vec::new();

    for token in tokens {
        match token {
            Suffix::Group(inner) => {
                if group.is_some() || pointers > 0 || !arrays.is_empty() {
                    // one group per level, before any other suffix
                    return Err(invalid());
                }
                group = Some(inner);
            }
            Suffix::Pointer => {
                if !arrays.is_empty() {
                    return Err(invalid());
                }
                pointers += 1;
            }
            Suffix::Array(count) => arrays.push(*count),
        }
    }

    let mut ty = lowest;
    for _ in 0..pointers {
        ty = ty.ptr_to();
    }
    for count in arrays.iter().rev() {
        ty = ty.array_of(*count);
    }

    match group {
        Some(inner) => apply_suffixes(ty, inner, expr),
        None => Ok(ty),
    }
}

/// Resolves a type expression against a symbol scope: the base name is
/// looked up in the fixed vocabulary first, then among the scope's
/// children, and the declarator suffixes wrap the result.
pub fn parse_type_name(scope: &SymbolRef, expr: &str) -> Result<Arc<TypeInfo>, TypeError> {
    let (base_name, tokens) = parse_expression(expr)?;

    let lowest = match BaseType::parse(&base_name) {
        Some(base) => TypeInfo::base(base, scope.machine()),
        None => {
            let sym = scope.child_by_name(&base_name)?;
            if !tokens.is_empty() && sym.sym_tag() == SymTag::Data {
                return Err(TypeError::DataSymbolInExpression(expr.to_string()));
            }
            TypeFactory::from_symbol(&sym)?
        }
    };

    apply_suffixes(lowest, &tokens, expr)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::symbol::{BasicKind, Machine, SyntheticSymbol};

    fn scope() -> SymbolRef {
        let int4 = SyntheticSymbol::base_type(BasicKind::Int, 4).build();
        let point = SyntheticSymbol::udt("Point", 8)
            .with_child(SyntheticSymbol::member("x", int4.clone(), 0).build())
            .with_child(SyntheticSymbol::member("y", int4.clone(), 4).build())
            .build();
        let var = SyntheticSymbol::member("g_count", int4, 0).build();
        SyntheticSymbol::scope(Machine::Amd64)
            .with_child(point)
            .with_child(var)
            .build()
    }

    #[test]
    fn test_base_type() {
        let ti = parse_type_name(&scope(), "Int4B").unwrap();
        assert_eq!(ti.name(), "Int4B");
        assert_eq!(ti.size(), 4);
    }

    #[test]
    fn test_pointer_round_trip() {
        let ti = parse_type_name(&scope(), "Int4B*").unwrap();
        assert!(ti.is_pointer());
        assert_eq!(ti.size(), 8);
        assert_eq!(ti.name(), "Int4B*");
    }

    #[test]
    fn test_pointer_to_pointer() {
        let ti = parse_type_name(&scope(), "Int4B**").unwrap();
        assert_eq!(ti.name(), "Int4B**");
        assert_eq!(ti.deref().unwrap().name(), "Int4B*");
    }

    #[test]
    fn test_array_round_trip() {
        let ti = parse_type_name(&scope(), "Int4B[4]").unwrap();
        assert!(ti.is_array());
        assert_eq!(ti.element_count().unwrap(), 4);
        assert_eq!(ti.size(), 16);
        assert_eq!(ti.name(), "Int4B[4]");
    }

    #[test]
    fn test_array_of_pointers() {
        let ti = parse_type_name(&scope(), "Int4B*[4]").unwrap();
        assert!(ti.is_array());
        assert_eq!(ti.size(), 32);
        assert_eq!(ti.element_by_index(0).unwrap().name(), "Int4B*");
        assert_eq!(ti.name(), "Int4B*[4]");
    }

    #[test]
    fn test_pointer_to_array() {
        let ti = parse_type_name(&scope(), "Int4B(*)[4]").unwrap();
        assert!(ti.is_pointer());
        assert_eq!(ti.size(), 8);
        assert_eq!(ti.deref().unwrap().size(), 16);
        assert_eq!(ti.name(), "Int4B(*)[4]");
    }

    #[test]
    fn test_multi_dimension() {
        let ti = parse_type_name(&scope(), "Int4B[2][3]").unwrap();
        assert_eq!(ti.size(), 24);
        assert_eq!(ti.element_count().unwrap(), 2);
        assert_eq!(ti.element_by_index(0).unwrap().size(), 12);
    }

    #[test]
    fn test_udt_lookup() {
        let ti = parse_type_name(&scope(), "Point").unwrap();
        assert!(ti.is_user_defined());
        assert_eq!(ti.element_count().unwrap(), 2);

        let ptr = parse_type_name(&scope(), "Point*").unwrap();
        assert_eq!(ptr.name(), "Point*");
    }

    #[test]
    fn test_data_symbol_expression_rejected() {
        assert!(matches!(
            parse_type_name(&scope(), "g_count*"),
            Err(TypeError::DataSymbolInExpression(_))
        ));
    }

    #[test]
    fn test_bare_data_symbol_resolves_to_declared_type() {
        let ti = parse_type_name(&scope(), "g_count").unwrap();
        assert_eq!(ti.name(), "Int4B");
    }

    #[test]
    fn test_invalid_expressions() {
        for expr in ["", "Int4B[", "Int4B[]", "Int4B[x]", "Int4B(", "Int4B)", "Int4B(*", "*"] {
            assert!(
                matches!(
                    parse_type_name(&scope(), expr),
                    Err(TypeError::InvalidTypeExpression(_))
                ),
                "expected rejection of {:?}",
                expr
            );
        }
    }

    #[test]
    fn test_array_before_pointer_rejected() {
        // the grammar cannot produce a pointer marker after a dimension
        // without grouping
        assert!(parse_type_name(&scope(), "Int4B[4]*").is_err());
    }

    #[test]
    fn test_unknown_symbol() {
        assert!(matches!(
            parse_type_name(&scope(), "Missing"),
            Err(TypeError::Symbol(_))
        ));
    }
}
