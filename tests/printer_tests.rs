use shtree::ast::*;
use shtree::token::{LitKind, Pos, Token};
use shtree::{expr_str, print, print_with, to_string, to_string_with, PrintConfig, RenderError};

fn param(modifier: ParamModifier) -> String {
    expr_str(&Expr::param("v", Some(modifier))).unwrap()
}

fn word(text: &str) -> Box<Expr> {
    Box::new(Expr::lit(LitKind::Empty, text))
}

fn echo(arg: &str) -> Stmt {
    Stmt::expr(Expr::call("echo", vec![Expr::ident(arg)]))
}

fn if_stmt(cond: &str, body: Vec<Stmt>) -> IfStmt {
    IfStmt {
        if_pos: Pos::NONE,
        cond: Expr::ident(cond),
        body: BlockStmt::of(body),
        elifs: vec![],
        else_block: None,
        end_pos: Pos::NONE,
    }
}

#[test]
fn test_default_value_expansion() {
    let e = Expr::ParamExp(ParamExp {
        dollar: Pos(1),
        lbrace: Pos(2),
        var: Box::new(Expr::Ident(Ident::at("count", Pos(3)))),
        modifier: Some(ParamModifier::DefaultVal(DefaultValExp {
            colon: Pos(8),
            sub: Pos(9),
            val: word("x"),
        })),
        rbrace: Pos(11),
    });
    assert_eq!(expr_str(&e).unwrap(), "${count:-x}");
}

#[test]
fn test_delete_prefix_longest_and_shortest() {
    let render = |longest| {
        expr_str(&Expr::param(
            "path",
            Some(ParamModifier::DelPrefix(DelPrefix {
                longest,
                hash: Pos::NONE,
                val: word("/*/"),
            })),
        ))
        .unwrap()
    };
    assert_eq!(render(true), "${path##/*/}");
    assert_eq!(render(false), "${path#/*/}");
}

#[test]
fn test_case_conversion_forms() {
    let render = |first_char, to_upper| {
        expr_str(&Expr::param(
            "name",
            Some(ParamModifier::CaseConversion(CaseConversionExp {
                first_char,
                to_upper,
            })),
        ))
        .unwrap()
    };
    assert_eq!(render(false, true), "${name^^}");
    assert_eq!(render(true, false), "${name,}");
    assert_eq!(render(true, true), "${name^}");
    assert_eq!(render(false, false), "${name,,}");
}

#[test]
fn test_binary_none_operator_compression() {
    let mut b = BinaryExpr {
        compress: true,
        x: Box::new(Expr::ident("a")),
        op_pos: Pos::NONE,
        op: Token::None,
        y: Box::new(Expr::ident("b")),
    };
    assert_eq!(expr_str(&Expr::Binary(b.clone())).unwrap(), "ab");
    b.compress = false;
    assert_eq!(expr_str(&Expr::Binary(b)).unwrap(), "a b");
}

#[test]
fn test_if_with_else_if_and_else() {
    let mut stmt = if_stmt("c", vec![echo("one")]);
    stmt.elifs.push(if_stmt("c2", vec![echo("two")]));
    stmt.else_block = Some(BlockStmt::of(vec![echo("three")]));

    let out = to_string(&Stmt::If(stmt)).unwrap();
    assert_eq!(
        out,
        "if c\n  echo one\nelse if c2\n  echo two\nelse\n  echo three\nend\n"
    );
}

#[test]
fn test_nested_else_if_is_rejected() {
    let mut inner = if_stmt("c2", vec![]);
    inner.else_block = Some(BlockStmt::default());
    let mut stmt = if_stmt("c", vec![]);
    stmt.elifs.push(inner);

    let err = to_string(&Stmt::If(stmt)).unwrap_err();
    assert!(matches!(err, RenderError::MalformedElseIf { .. }));
}

#[test]
fn test_command_substitution_forms() {
    let inner = Box::new(Expr::call("echo", vec![Expr::ident("hi")]));
    let mut subst = CmdSubst {
        dollar: Pos::NONE,
        tok: Token::LParen,
        opening: Pos::NONE,
        x: inner,
        closing: Pos::NONE,
    };
    assert_eq!(expr_str(&Expr::CmdSubst(subst.clone())).unwrap(), "$( echo hi )");
    subst.tok = Token::BackQuote;
    assert_eq!(expr_str(&Expr::CmdSubst(subst)).unwrap(), "` echo hi `");
}

#[test]
fn test_every_modifier_has_its_own_form() {
    let cases = vec![
        (
            ParamModifier::DefaultValAssign(DefaultValAssignExp {
                colon: Pos::NONE,
                assign: Pos::NONE,
                val: word("d"),
            }),
            "${v:=d}",
        ),
        (
            ParamModifier::NonNullCheck(NonNullCheckExp {
                colon: Pos::NONE,
                quest: Pos::NONE,
                val: word("msg"),
            }),
            "${v:?msg}",
        ),
        (
            ParamModifier::NonNull(NonNullExp {
                colon: Pos::NONE,
                add: Pos::NONE,
                val: word("alt"),
            }),
            "${v:+alt}",
        ),
        (ParamModifier::Prefix(PrefixExp::default()), "${!v*}"),
        (ParamModifier::PrefixArray(PrefixArrayExp::default()), "${!v@}"),
        (
            ParamModifier::ArrayIndex(ArrayIndexExp {
                bitnot: Pos::NONE,
                lbracket: Pos::NONE,
                tok: Token::At,
                tok_pos: Pos::NONE,
                rbracket: Pos::NONE,
            }),
            "${!v[@]}",
        ),
        (
            ParamModifier::ArrayIndex(ArrayIndexExp {
                bitnot: Pos::NONE,
                lbracket: Pos::NONE,
                tok: Token::Mul,
                tok_pos: Pos::NONE,
                rbracket: Pos::NONE,
            }),
            "${!v[*]}",
        ),
        (ParamModifier::Length(LengthExp::default()), "${#v}"),
        (
            ParamModifier::DelSuffix(DelSuffix {
                longest: true,
                percent: Pos::NONE,
                val: word(".*"),
            }),
            "${v%%.*}",
        ),
        (
            ParamModifier::DelSuffix(DelSuffix {
                longest: false,
                percent: Pos::NONE,
                val: word(".*"),
            }),
            "${v%.*}",
        ),
        (
            ParamModifier::Substring(SubstringExp {
                offset: 2,
                ..SubstringExp::default()
            }),
            "${v:2}",
        ),
        (
            ParamModifier::Substring(SubstringExp {
                offset: 2,
                length: Some(2),
                ..SubstringExp::default()
            }),
            "${v:2:2}",
        ),
        (
            ParamModifier::Substring(SubstringExp {
                offset: -3,
                ..SubstringExp::default()
            }),
            "${v: -3}",
        ),
        (
            ParamModifier::Replace(ReplaceExp {
                old: "a".into(),
                new: "b".into(),
                ..ReplaceExp::default()
            }),
            "${v/a/b}",
        ),
        (
            ParamModifier::Replace(ReplaceExp {
                all: true,
                old: "a".into(),
                new: "b".into(),
                ..ReplaceExp::default()
            }),
            "${v//a/b}",
        ),
        (
            ParamModifier::ReplacePrefix(ReplacePrefixExp {
                old: "a".into(),
                new: "b".into(),
                ..ReplacePrefixExp::default()
            }),
            "${v/#a/b}",
        ),
        (
            ParamModifier::ReplaceSuffix(ReplaceSuffixExp {
                old: "a".into(),
                new: "b".into(),
                ..ReplaceSuffixExp::default()
            }),
            "${v/%a/b}",
        ),
        (
            ParamModifier::Operator(OperatorExp {
                at: Pos::NONE,
                op: ExpOperator::Quote,
            }),
            "${v@Q}",
        ),
    ];

    for (modifier, expected) in cases {
        assert_eq!(param(modifier), expected);
    }
    assert_eq!(expr_str(&Expr::param("v", None)).unwrap(), "${v}");
}

#[test]
fn test_every_transformation_operator() {
    let rendered: Vec<String> = ExpOperator::ALL
        .iter()
        .map(|&op| param(ParamModifier::Operator(OperatorExp { at: Pos::NONE, op })))
        .collect();
    assert_eq!(
        rendered,
        vec![
            "${v@U}", "${v@u}", "${v@L}", "${v@Q}", "${v@E}", "${v@P}", "${v@A}", "${v@K}",
            "${v@a}", "${v@k}",
        ]
    );
}

#[test]
fn test_substring_negative_offset_differs_from_default_value() {
    let substring = param(ParamModifier::Substring(SubstringExp {
        offset: -1,
        ..SubstringExp::default()
    }));
    let default = param(ParamModifier::DefaultVal(DefaultValExp {
        colon: Pos::NONE,
        sub: Pos::NONE,
        val: word("1"),
    }));
    assert_ne!(substring, default);
}

#[test]
fn test_invalid_array_selector() {
    let err = expr_str(&Expr::param(
        "v",
        Some(ParamModifier::ArrayIndex(ArrayIndexExp {
            bitnot: Pos::NONE,
            lbracket: Pos::NONE,
            tok: Token::Hash,
            tok_pos: Pos::NONE,
            rbracket: Pos::NONE,
        })),
    ))
    .unwrap_err();
    assert!(matches!(
        err,
        RenderError::InvalidArraySelector { tok: Token::Hash }
    ));
}

#[test]
fn test_test_and_arithmetic_delimiters() {
    let cond = Expr::binary(Expr::ident("i"), Token::Lt, Expr::lit(LitKind::Integer, "3"));
    let basic = Expr::BasicTest(BasicTestExpr {
        lbrack: Pos::NONE,
        x: Box::new(cond.clone()),
        rbrack: Pos::NONE,
    });
    let extended = Expr::ExtendedTest(ExtendedTestExpr {
        lbrack: Pos::NONE,
        x: Box::new(cond.clone()),
        rbrack: Pos::NONE,
    });
    let eval = Expr::ArithEval(ArithEvalExpr {
        lparen: Pos::NONE,
        x: Box::new(cond.clone()),
        rparen: Pos::NONE,
    });
    let exp = Expr::ArithExp(ArithExp {
        dollar: Pos::NONE,
        lparen: Pos::NONE,
        x: Box::new(cond.clone()),
        rparen: Pos::NONE,
    });
    let procsub = Expr::ProcSubst(ProcSubst {
        tok: Token::Lt,
        tok_pos: Pos::NONE,
        lparen: Pos::NONE,
        x: Box::new(Expr::call("ls", vec![])),
        rparen: Pos::NONE,
    });

    assert_eq!(expr_str(&basic).unwrap(), "[ i < 3 ]");
    assert_eq!(expr_str(&extended).unwrap(), "[[ i < 3 ]]");
    assert_eq!(expr_str(&eval).unwrap(), "(( i < 3 ))");
    assert_eq!(expr_str(&exp).unwrap(), "$(( i < 3 ))");
    assert_eq!(expr_str(&procsub).unwrap(), "<( ls )");
}

#[test]
fn test_loops_and_control_flow() {
    let body = BlockStmt::of(vec![
        echo("x"),
        Stmt::Break(BreakStmt::default()),
        Stmt::Continue(ContinueStmt::default()),
    ]);
    let w = Stmt::While(WhileStmt {
        while_pos: Pos::NONE,
        cond: Expr::ident("true"),
        body: body.clone(),
        end_pos: Pos::NONE,
    });
    assert_eq!(
        to_string(&w).unwrap(),
        "while true\n  echo x\n  break\n  continue\nend\n"
    );

    let f = Stmt::Foreach(ForeachStmt {
        for_pos: Pos::NONE,
        elem: Expr::ident("f"),
        in_pos: Pos::NONE,
        group: vec![Expr::ident("a"), Expr::ident("b")],
        body: BlockStmt::of(vec![echo("f")]),
        end_pos: Pos::NONE,
    });
    assert_eq!(to_string(&f).unwrap(), "for f in a b\n  echo f\nend\n");

    let ret = Stmt::Return(ReturnStmt {
        ret: Pos::NONE,
        x: Some(Expr::lit(LitKind::Integer, "1")),
    });
    assert_eq!(to_string(&ret).unwrap(), "return 1\n");
    assert_eq!(to_string(&Stmt::Return(ReturnStmt::default())).unwrap(), "return\n");
}

#[test]
fn test_switch_with_default_case() {
    let switch = Stmt::Switch(SwitchStmt {
        switch: Pos::NONE,
        lparen: Pos::NONE,
        var: Expr::ident("x"),
        rparen: Pos::NONE,
        cases: vec![CaseClause {
            case: Pos::NONE,
            conds: vec![Expr::ident("a"), Expr::ident("b")],
            body: BlockStmt::of(vec![echo("ab")]),
        }],
        else_block: Some(BlockStmt::of(vec![echo("other")])),
        end_pos: Pos::NONE,
    });
    assert_eq!(
        to_string(&switch).unwrap(),
        "switch x\n  case a b\n    echo ab\n  case '*'\n    echo other\nend\n"
    );
}

#[test]
fn test_parenthesized_switch() {
    let switch = Stmt::Switch(SwitchStmt {
        switch: Pos(1),
        lparen: Pos(8),
        var: Expr::ident("x"),
        rparen: Pos(10),
        cases: vec![],
        else_block: None,
        end_pos: Pos(12),
    });
    assert_eq!(to_string(&switch).unwrap(), "switch (x)\nend\n");
}

#[test]
fn test_file_with_comments_functions_and_statements() {
    let file = File {
        doc: Some(CommentGroup {
            list: vec![Comment {
                hash: Pos(1),
                text: "# greeting".into(),
            }],
        }),
        decls: vec![Decl::Func(FuncDecl {
            function: Pos::NONE,
            name: Ident::new("greet"),
            recv: vec![Expr::ident("who")],
            body: BlockStmt::of(vec![Stmt::expr(Expr::call(
                "echo",
                vec![Expr::string("hello")],
            ))]),
            end_pos: Pos::NONE,
        })],
        stmts: vec![
            Stmt::Assign(AssignStmt {
                local: false,
                lhs: Expr::ident("n"),
                assign: Pos::NONE,
                rhs: Expr::lit(LitKind::Integer, "1"),
            }),
            Stmt::Block(BlockStmt {
                tok: Token::LBrace,
                list: vec![echo("n")],
                ..BlockStmt::default()
            }),
        ],
    };

    assert_eq!(
        to_string(&file).unwrap(),
        "# greeting\nfunction greet who\n  echo \"hello\"\nend\nn=1\n{\n  echo n\n}\n"
    );
}

#[test]
fn test_stream_and_string_output_match() {
    let mut stmt = if_stmt("ready", vec![echo("go")]);
    stmt.else_block = Some(BlockStmt::of(vec![echo("wait")]));
    let stmt = Stmt::If(stmt);

    let mut buf = Vec::new();
    print(&stmt, &mut buf).unwrap();
    assert_eq!(String::from_utf8(buf).unwrap(), to_string(&stmt).unwrap());

    // Rendering twice yields the same text.
    assert_eq!(to_string(&stmt).unwrap(), to_string(&stmt).unwrap());
}

#[test]
fn test_custom_indent_and_default_case() {
    let config = PrintConfig::from_toml("indent = \"\\t\"\ndefault_case = \"*\"").unwrap();
    let switch = Stmt::Switch(SwitchStmt {
        switch: Pos::NONE,
        lparen: Pos::NONE,
        var: Expr::ident("x"),
        rparen: Pos::NONE,
        cases: vec![],
        else_block: Some(BlockStmt::of(vec![echo("any")])),
        end_pos: Pos::NONE,
    });

    let out = to_string_with(&switch, &config).unwrap();
    assert_eq!(out, "switch x\n\tcase *\n\t\techo any\nend\n");

    let mut buf = Vec::new();
    print_with(&switch, &mut buf, &config).unwrap();
    assert_eq!(String::from_utf8(buf).unwrap(), out);
}

#[test]
fn test_error_inside_nested_body_surfaces() {
    let stmt = Stmt::While(WhileStmt {
        while_pos: Pos::NONE,
        cond: Expr::ident("true"),
        body: BlockStmt::of(vec![Stmt::expr(Expr::ident(""))]),
        end_pos: Pos::NONE,
    });
    assert!(matches!(
        to_string(&stmt),
        Err(RenderError::EmptyIdent { .. })
    ));
}

fn group(list: Vec<Stmt>) -> Expr {
    Expr::CmdGroup(CmdGroup {
        lbrace: Pos::NONE,
        list,
        rbrace: Pos::NONE,
    })
}

#[test]
fn test_group_keeps_multiline_literal_intact() {
    let g = group(vec![Stmt::expr(Expr::call(
        "echo",
        vec![Expr::string("a\n   b")],
    ))]);
    assert_eq!(expr_str(&g).unwrap(), "{ echo \"a\n   b\"; }");
}

#[test]
fn test_group_with_braced_block() {
    let g = group(vec![Stmt::Block(BlockStmt {
        tok: Token::LBrace,
        list: vec![Stmt::expr(Expr::call("echo", vec![]))],
        ..BlockStmt::default()
    })]);
    let text = expr_str(&g).unwrap();
    assert_eq!(text, "{ { echo; }; }");
    assert!(!text.contains("{;"));
}

#[test]
fn test_group_with_compound_statements() {
    let mut cond = if_stmt("ok", vec![echo("yes")]);
    cond.else_block = Some(BlockStmt::of(vec![echo("no")]));
    let g = group(vec![
        Stmt::Assign(AssignStmt {
            local: true,
            lhs: Expr::ident("n"),
            assign: Pos::NONE,
            rhs: Expr::lit(LitKind::Integer, "2"),
        }),
        Stmt::If(cond),
    ]);
    assert_eq!(
        expr_str(&g).unwrap(),
        "{ local n=2; if ok; echo yes; else; echo no; end; }"
    );
}

#[test]
fn test_operand_braces_cannot_close_expansion() {
    let default = param(ParamModifier::DefaultVal(DefaultValExp {
        colon: Pos::NONE,
        sub: Pos::NONE,
        val: word("a}b"),
    }));
    assert_eq!(default, "${v:-a\\}b}");

    let balanced = param(ParamModifier::DefaultVal(DefaultValExp {
        colon: Pos::NONE,
        sub: Pos::NONE,
        val: word("{a}"),
    }));
    assert_eq!(balanced, "${v:-{a}}");

    let replace = param(ParamModifier::Replace(ReplaceExp {
        all: true,
        old: "x}".into(),
        new: "}".into(),
        ..ReplaceExp::default()
    }));
    assert_eq!(replace, "${v//x\\}/\\}}");
}

#[test]
fn test_expression_node_prints_same_text_as_expr_str() {
    let e = Expr::param("path", Some(ParamModifier::Length(LengthExp::default())));
    assert_eq!(to_string(&e).unwrap(), format!("{}\n", expr_str(&e).unwrap()));
}
