/// End-to-end tests: source text -> tokens -> AST
use playscript::{
    parse, parse_expression, Ast, NodeKind, NodeRef, Parser, Scanner, SyntaxErrorKind,
    MAX_NESTING_DEPTH,
};

/// Renders a tree as nested `(op left right)` forms for compact assertions
fn sexpr(node: NodeRef<'_>) -> String {
    if node.is_leaf() {
        return node.text().to_string();
    }
    let children: Vec<String> = node.children().map(sexpr).collect();
    match node.kind() {
        NodeKind::Program => format!("(program {})", children.join(" ")),
        NodeKind::IntDeclaration => format!("(int {} {})", node.text(), children.join(" ")),
        NodeKind::AssignmentStatement => format!("(= {} {})", node.text(), children.join(" ")),
        _ => format!("({} {})", node.text(), children.join(" ")),
    }
}

fn statement_kinds(ast: &Ast) -> Vec<NodeKind> {
    ast.root().children().map(|n| n.kind()).collect()
}

fn syntax_kind(source: &str) -> Option<SyntaxErrorKind> {
    parse(source).unwrap_err().syntax_kind()
}

#[test]
fn test_program_with_three_statement_kinds() {
    let ast = parse("int a = 1; a = a+1; a+2;").unwrap();
    assert_eq!(ast.root().kind(), NodeKind::Program);
    assert_eq!(
        statement_kinds(&ast),
        vec![
            NodeKind::IntDeclaration,
            NodeKind::AssignmentStatement,
            NodeKind::Additive
        ]
    );
    assert_eq!(sexpr(ast.root()), "(program (int a 1) (= a (+ a 1)) (+ a 2))");
}

#[test]
fn test_sample_script() {
    let ast = parse("int age = 45+2; age= 20; age+10*2;").unwrap();
    assert_eq!(
        sexpr(ast.root()),
        "(program (int age (+ 45 2)) (= age 20) (+ age (* 10 2)))"
    );
}

#[test]
fn test_declaration_without_initializer() {
    let ast = parse("int counter;").unwrap();
    let decl = ast.root().child(0).unwrap();
    assert_eq!(decl.kind(), NodeKind::IntDeclaration);
    assert_eq!(decl.text(), "counter");
    assert_eq!(decl.child_count(), 0);
}

#[test]
fn test_precedence_and_associativity() {
    assert_eq!(sexpr(parse_expression("2+3*5").unwrap().root()), "(+ 2 (* 3 5))");
    assert_eq!(sexpr(parse_expression("2+3+4").unwrap().root()), "(+ (+ 2 3) 4)");
    assert_eq!(sexpr(parse_expression("a-b-c").unwrap().root()), "(- (- a b) c)");
    assert_eq!(sexpr(parse_expression("8/4/2").unwrap().root()), "(/ (/ 8 4) 2)");
    assert_eq!(
        sexpr(parse_expression("(2+3)*(4-1)").unwrap().root()),
        "(* (+ 2 3) (- 4 1))"
    );
}

#[test]
fn test_parentheses_are_flattened() {
    let ast = parse("((x));").unwrap();
    let expr = ast.root().child(0).unwrap();
    assert_eq!(expr.kind(), NodeKind::Identifier);
    assert_eq!(ast.len(), 2);
}

#[test]
fn test_expression_starting_with_identifier() {
    let ast = parse("age + 1;").unwrap();
    assert_eq!(statement_kinds(&ast), vec![NodeKind::Additive]);
}

#[test]
fn test_parent_links() {
    let ast = parse("x = 1 * 2;").unwrap();
    let assign = ast.root().child(0).unwrap();
    let product = assign.child(0).unwrap();
    let one = product.child(0).unwrap();

    assert_eq!(one.parent().unwrap().id(), product.id());
    assert_eq!(product.parent().unwrap().id(), assign.id());
    assert_eq!(assign.parent().unwrap().id(), ast.root_id());
    assert!(ast.root().parent().is_none());
}

#[test]
fn test_empty_program() {
    let ast = parse("   ").unwrap();
    assert_eq!(ast.root().kind(), NodeKind::Program);
    assert_eq!(ast.root().child_count(), 0);
}

#[test]
fn test_scanner_and_parser_aliases() {
    let tokens = Scanner::new("int x = 3;").scan_tokens();
    let ast = Parser::new(tokens).parse().unwrap();
    assert_eq!(sexpr(ast.root()), "(program (int x 3))");
}

#[test]
fn test_error_kinds() {
    assert_eq!(syntax_kind("int = 5;"), Some(SyntaxErrorKind::MissingIdentifier));
    assert_eq!(syntax_kind("int 5;"), Some(SyntaxErrorKind::MissingIdentifier));
    assert_eq!(syntax_kind("int"), Some(SyntaxErrorKind::UnknownStatement));
    assert_eq!(syntax_kind("int a = ;"), Some(SyntaxErrorKind::MissingExpression));
    assert_eq!(syntax_kind("a = ;"), Some(SyntaxErrorKind::MissingExpression));
    assert_eq!(syntax_kind("();"), Some(SyntaxErrorKind::MissingExpression));
    assert_eq!(syntax_kind("int a = 1"), Some(SyntaxErrorKind::MissingSemicolon));
    assert_eq!(syntax_kind("int a 1;"), Some(SyntaxErrorKind::MissingSemicolon));
    assert_eq!(syntax_kind("a = 1"), Some(SyntaxErrorKind::MissingSemicolon));
    assert_eq!(syntax_kind("2+3+;"), Some(SyntaxErrorKind::MissingRightOperand));
    assert_eq!(syntax_kind("2+3*;"), Some(SyntaxErrorKind::MissingRightOperand));
    assert_eq!(syntax_kind("(1+2;"), Some(SyntaxErrorKind::MissingRightParen));
    assert_eq!(syntax_kind(";"), Some(SyntaxErrorKind::UnknownStatement));
    assert_eq!(syntax_kind("a b;"), Some(SyntaxErrorKind::UnknownStatement));
    assert_eq!(syntax_kind("age >= 45;"), Some(SyntaxErrorKind::UnknownStatement));
}

#[test]
fn test_first_error_wins() {
    let err = parse("int a = 1;\nb = ;\nc c;").unwrap_err();
    assert_eq!(err.syntax_kind(), Some(SyntaxErrorKind::MissingExpression));
    assert_eq!(err.location(), Some((2, 5)));
    assert!(err.to_string().contains("Expected an expression after `=`, found `;`"));
}

#[test]
fn test_standalone_expression_errors() {
    let err = parse_expression("").unwrap_err();
    assert_eq!(err.syntax_kind(), Some(SyntaxErrorKind::MissingExpression));

    let err = parse_expression("2+").unwrap_err();
    assert_eq!(err.syntax_kind(), Some(SyntaxErrorKind::MissingRightOperand));

    let err = parse_expression("1 2").unwrap_err();
    assert_eq!(err.syntax_kind(), Some(SyntaxErrorKind::TrailingInput));
    assert_eq!(err.location(), Some((1, 3)));
}

#[test]
fn test_ast_serializes() {
    let ast = parse("int a = 1;").unwrap();
    let json = serde_json::to_value(&ast).unwrap();
    assert_eq!(json["nodes"].as_array().unwrap().len(), 3);
    assert_eq!(json["nodes"][0]["kind"], "IntLiteral");
}

#[test]
fn test_many_assignment_statements() {
    // Every assignment first fails as an expression statement and backtracks.
    let count = 20_000;
    let source: String = (0..count).map(|i| format!("v{i} = {i} + 1;\n")).collect();
    let ast = parse(&source).unwrap();

    assert_eq!(ast.root().child_count(), count);
    assert_eq!(ast.len(), 1 + count * 4);
    assert!(ast
        .root()
        .children()
        .all(|n| n.kind() == NodeKind::AssignmentStatement));
}

#[test]
fn test_pathological_nesting_is_an_error() {
    let depth = 200_000;
    let source = format!("{}1{};", "(".repeat(depth), ")".repeat(depth));
    let err = parse(&source).unwrap_err();
    assert_eq!(err.syntax_kind(), Some(SyntaxErrorKind::NestingTooDeep));
    assert_eq!(err.location(), Some((1, MAX_NESTING_DEPTH + 1)));
}

#[test]
fn test_node_storage_matches_views() {
    let ast = parse("int a = 1; a = a * 2; a - 3;").unwrap();

    for view in ast.preorder() {
        let node = ast.node(view.id()).unwrap();
        assert_eq!(node.kind(), view.kind());
        assert_eq!(node.text(), view.text());
        assert_eq!(node.parent(), view.parent().map(|p| p.id()));
        let child_ids: Vec<_> = view.children().map(|c| c.id()).collect();
        assert_eq!(node.children(), child_ids.as_slice());
        assert_eq!(ast.get(view.id()).map(|n| n.kind()), Some(view.kind()));
    }
    assert_eq!(ast.root().id(), ast.root_id());
    assert_eq!(ast.root_id().index(), ast.len() - 1);
}

#[test]
fn test_statement_and_expression_kinds() {
    let ast = parse("int a = 1; a = a * 2; a - 3;").unwrap();
    let statements: Vec<_> = ast.root().children().collect();

    assert!(statements[0].kind().is_statement());
    assert!(statements[1].kind().is_statement());
    assert!(!statements[2].kind().is_statement());
    assert!(statements[2].kind().is_expression());
    assert!(!ast.root().kind().is_statement());
    assert!(!ast.root().kind().is_expression());
    for node in ast.preorder() {
        if node.parent().is_some_and(|p| p.kind() != NodeKind::Program) {
            assert!(node.kind().is_expression(), "{} under an expression", node.kind());
        }
    }
}
