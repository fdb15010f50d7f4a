use criterion::{black_box, criterion_group, criterion_main, Criterion};
use shtree::ast::*;
use shtree::token::{LitKind, Pos, Token};

fn sample_file(loops: usize) -> File {
    let body = BlockStmt::of(vec![
        Stmt::expr(Expr::call(
            "echo",
            vec![Expr::param(
                "item",
                Some(ParamModifier::DelSuffix(DelSuffix {
                    longest: true,
                    percent: Pos::NONE,
                    val: Box::new(Expr::lit(LitKind::Empty, ".*")),
                })),
            )],
        )),
        Stmt::If(IfStmt {
            if_pos: Pos::NONE,
            cond: Expr::ExtendedTest(ExtendedTestExpr {
                lbrack: Pos::NONE,
                x: Box::new(Expr::binary(
                    Expr::ident("item"),
                    Token::Eq,
                    Expr::string("stop"),
                )),
                rbrack: Pos::NONE,
            }),
            body: BlockStmt::of(vec![Stmt::Break(BreakStmt::default())]),
            elifs: vec![],
            else_block: None,
            end_pos: Pos::NONE,
        }),
    ]);

    let stmts = (0..loops)
        .map(|i| {
            Stmt::Foreach(ForeachStmt {
                for_pos: Pos::NONE,
                elem: Expr::ident("item"),
                in_pos: Pos::NONE,
                group: vec![Expr::ident(format!("list{}", i))],
                body: body.clone(),
                end_pos: Pos::NONE,
            })
        })
        .collect();

    File {
        doc: None,
        decls: vec![],
        stmts,
    }
}

fn bench_render(c: &mut Criterion) {
    let small = sample_file(10);
    let large = sample_file(1000);

    c.bench_function("render_small_file", |b| {
        b.iter(|| shtree::to_string(black_box(&small)).unwrap());
    });

    c.bench_function("render_large_file", |b| {
        b.iter(|| shtree::to_string(black_box(&large)).unwrap());
    });
}

fn bench_walk(c: &mut Criterion) {
    let large = sample_file(1000);

    c.bench_function("inspect_large_file", |b| {
        b.iter(|| {
            let mut count = 0usize;
            inspect(black_box(&large), |_| {
                count += 1;
                true
            });
            count
        });
    });

    c.bench_function("check_spans_large_file", |b| {
        b.iter(|| check_spans(black_box(&large)));
    });
}

criterion_group!(benches, bench_render, bench_walk);
criterion_main!(benches);
