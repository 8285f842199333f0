use crate::expr::{Atom, Expr, Position, Span};

fn sym(name: &str) -> Expr {
    Expr::Atom(Atom::Symbol(name.to_string()), Span::default())
}

fn num(value: f64) -> Expr {
    Expr::Atom(Atom::Number(value), Span::default())
}

#[test]
fn display_integral_number_has_no_fraction() {
    assert_eq!(num(5.0).to_string(), "5");
    assert_eq!(num(-12.0).to_string(), "-12");
}

#[test]
fn display_fractional_number_keeps_fraction() {
    assert_eq!(num(5.5).to_string(), "5.5");
}

#[test]
fn display_string_requotes_and_escapes() {
    let expr = Expr::Atom(Atom::Str("say \"hi\"".to_string()), Span::default());
    assert_eq!(expr.to_string(), "\"say \\\"hi\\\"\"");
}

#[test]
fn display_list_is_space_joined() {
    let expr = Expr::List(
        vec![
            sym("+"),
            num(1.0),
            Expr::List(vec![sym("*"), num(2.0), num(3.0)], Span::default()),
        ],
        Span::default(),
    );
    assert_eq!(expr.to_string(), "(+ 1 (* 2 3))");
}

#[test]
fn display_atoms() {
    assert_eq!(Expr::Atom(Atom::Bool(true), Span::default()).to_string(), "true");
    assert_eq!(Expr::Atom(Atom::Nil, Span::default()).to_string(), "nil");
}

#[test]
fn head_symbol_of_list() {
    let expr = Expr::List(vec![sym("fn"), sym("add")], Span::default());
    assert_eq!(expr.head_symbol(), Some("fn"));
    assert_eq!(sym("fn").head_symbol(), None);
    assert_eq!(Expr::List(vec![num(1.0)], Span::default()).head_symbol(), None);
}

#[test]
fn span_accessor_returns_own_span() {
    let span = Span::new(Position::new(2, 1, 10), Position::new(2, 5, 14));
    let expr = Expr::Atom(Atom::Nil, span);
    assert_eq!(expr.span(), span);

    let point = Span::single(Position::new(1, 1, 0));
    assert_eq!(point.start, point.end);
}
