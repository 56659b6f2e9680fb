//! Codec tests - fixture decoding, pinned encodings, quiz tracking and round trips

use fumen::codec::action::decode_action;
use fumen::core::{Field, FieldLine, FumenError, QuizOperation};
use fumen::types::{Coordinate, Piece, Rotation};
use fumen::{decode, encode, encode_with, Action, CodecConfig, Page};
use proptest::prelude::*;

const FIXTURE: &str = "v115@9gi0EeR4Rpg0DeR4wwRpglCeBtxwilDeBtwwJeAgHvhERmBuqBMrBXsBAAA";

fn no_wrap() -> CodecConfig {
    CodecConfig { wrap_lines: false }
}

fn bottom_rows(field: &Field, count: usize) -> Vec<String> {
    let rows = field.to_rows();
    rows[rows.len() - count..].to_vec()
}

fn blank_pages(count: usize) -> Vec<Page> {
    (0..count).map(|i| Page::new(i, Field::new())).collect()
}

#[test]
fn test_fixture_decodes_six_pages() {
    let pages = decode(FIXTURE).unwrap();
    assert_eq!(pages.len(), 6);
    assert!(pages[5].is_last_page);
    assert!(pages[..5].iter().all(|p| !p.is_last_page));
    assert_eq!(pages[0].comment.as_deref(), Some(""));
    assert!(pages[1..].iter().all(|p| p.comment.is_none()));
}

#[test]
fn test_fixture_fields() {
    let pages = decode(FIXTURE).unwrap();
    assert_eq!(
        bottom_rows(&pages[0].field, 4),
        ["JJJ_____SS", "OOJ____SST", "OOL___ZZTT", "LLL____ZZT"]
    );
    assert_eq!(pages[1].field, pages[0].field);
    assert_eq!(
        bottom_rows(&pages[3].field, 3),
        ["JJJJJ___SS", "OOLJ__ZZTT", "LLLJ___ZZT"]
    );
    assert_eq!(
        bottom_rows(&pages[4].field, 2),
        ["JJJJJZ__SS", "LLLJZ__ZZT"]
    );
    assert_eq!(pages[5].field, Field::new());
}

#[test]
fn test_fixture_actions() {
    let pages = decode(FIXTURE).unwrap();
    let placed: Vec<(Piece, Rotation, Coordinate)> = pages
        .iter()
        .map(|p| (p.action.piece, p.action.rotation, p.action.coordinate))
        .collect();
    assert_eq!(
        placed,
        [
            (Piece::Empty, Rotation::Reverse, Coordinate::new(0, 22)),
            (Piece::I, Rotation::Spawn, Coordinate::new(4, 2)),
            (Piece::J, Rotation::Right, Coordinate::new(3, 1)),
            (Piece::Z, Rotation::Right, Coordinate::new(4, 1)),
            (Piece::S, Rotation::Spawn, Coordinate::new(6, 0)),
            (Piece::Empty, Rotation::Reverse, Coordinate::new(0, 22)),
        ]
    );
    assert!(pages.iter().all(|p| p.action.is_lock));
}

#[test]
fn test_fixture_reencodes_identically() {
    let pages = decode(FIXTURE).unwrap();
    assert_eq!(encode_with(&pages, &no_wrap()).unwrap(), FIXTURE);

    let wrapped = encode(&pages).unwrap();
    assert_eq!(wrapped.matches('?').count(), 1);
    assert_eq!(wrapped.replace('?', ""), FIXTURE);
    assert_eq!(decode(&wrapped).unwrap(), pages);
}

#[test]
fn test_blank_pages() {
    assert_eq!(encode(&blank_pages(3)).unwrap(), "v115@vhCAgHAgHAgH");
    assert_eq!(decode("v115@vhCAgHAgHAgH").unwrap(), {
        let mut pages = blank_pages(3);
        pages[0].comment = Some(String::new());
        pages[2].is_last_page = true;
        pages
    });
}

#[test]
fn test_long_repeat_runs() {
    let fumen = encode(&blank_pages(70)).unwrap();
    let pages = decode(&fumen).unwrap();
    assert_eq!(pages.len(), 70);
    assert!(fumen.replace('?', "").contains("vh/"));
}

#[test]
fn test_comments() {
    let pages = vec![
        Page::new(0, Field::new()).with_comment("hello"),
        Page::new(1, Field::new()).with_comment("テトリス"),
        Page::new(2, Field::new()),
    ];
    let fumen = encode_with(&pages, &no_wrap()).unwrap();
    assert_eq!(
        fumen,
        "v115@vhCAgWFAooMDEPBAAAAgWYAlvs2AjxDfETIPSBlvs2AFCEfET4kVBAgH"
    );

    let decoded = decode(&fumen).unwrap();
    assert_eq!(decoded[0].comment.as_deref(), Some("hello"));
    assert_eq!(decoded[1].comment.as_deref(), Some("テトリス"));
    assert_eq!(decoded[2].comment, None);
    assert_eq!(decoded[2].comment_ref, 1);
}

#[test]
fn test_quiz_comment_page() {
    let page = Page {
        action: Action::place(Piece::J, Rotation::Spawn, Coordinate::new(1, 0)),
        ..Page::new(0, Field::new())
    }
    .with_comment("#Q=[](J)Z");
    let fumen = encode(&[page]).unwrap();
    assert_eq!(fumen, "v115@vhA2OYVAFLDmClcJSAVDEHBEooRBKoAVB6AAAA");

    let decoded = decode(&fumen).unwrap();
    assert_eq!(decoded[0].quiz_operation, Some(QuizOperation::Direct));
}

fn quiz_chain(comment: &str, placements: &[(Piece, Rotation, Coordinate)]) -> Vec<Page> {
    let mut pages = vec![Page::new(0, Field::new()).with_comment(comment)];
    pages[0].action = Action {
        is_comment: true,
        ..Action::place(placements[0].0, placements[0].1, placements[0].2)
    };
    for &(piece, rotation, at) in &placements[1..] {
        let next = pages[pages.len() - 1].next_page(Action::place(piece, rotation, at));
        pages.push(next);
    }
    pages
}

#[test]
fn test_quiz_operations_follow_locked_pieces() {
    let pages = quiz_chain(
        "#Q=[](T)IO",
        &[
            (Piece::T, Rotation::Spawn, Coordinate::new(4, 0)),
            (Piece::I, Rotation::Spawn, Coordinate::new(4, 5)),
            (Piece::O, Rotation::Spawn, Coordinate::new(0, 10)),
            // Queue is empty now; further pieces are not checked.
            (Piece::Z, Rotation::Spawn, Coordinate::new(4, 15)),
        ],
    );
    let decoded = decode(&encode(&pages).unwrap()).unwrap();
    let ops: Vec<Option<QuizOperation>> = decoded.iter().map(|p| p.quiz_operation).collect();
    assert_eq!(
        ops,
        [
            Some(QuizOperation::Direct),
            Some(QuizOperation::Direct),
            Some(QuizOperation::Direct),
            None
        ]
    );
}

#[test]
fn test_quiz_swap_and_stock() {
    let swap = quiz_chain(
        "#Q=[S](T)Z",
        &[(Piece::S, Rotation::Spawn, Coordinate::new(4, 0))],
    );
    let decoded = decode(&encode(&swap).unwrap()).unwrap();
    assert_eq!(decoded[0].quiz_operation, Some(QuizOperation::Swap));

    let stock = quiz_chain(
        "#Q=[](T)ZO",
        &[
            (Piece::Z, Rotation::Spawn, Coordinate::new(4, 0)),
            (Piece::O, Rotation::Spawn, Coordinate::new(0, 10)),
        ],
    );
    let decoded = decode(&encode(&stock).unwrap()).unwrap();
    assert_eq!(decoded[0].quiz_operation, Some(QuizOperation::Stock));
    assert_eq!(decoded[1].quiz_operation, Some(QuizOperation::Direct));
}

#[test]
fn test_quiz_text_repeats_every_thirty_pages() {
    let mut pages = blank_pages(32);
    pages[0] = pages[0].clone().with_comment("#Q=[](T)I");
    let decoded = decode(&encode(&pages).unwrap()).unwrap();

    assert_eq!(decoded[0].comment.as_deref(), Some("#Q=[](T)I"));
    assert!(decoded[1..30].iter().all(|p| p.comment.is_none()));
    assert_eq!(decoded[30].comment.as_deref(), Some("#Q=[](T)I"));
    assert_eq!(decoded[31].comment.as_deref(), Some("#Q=[](T)I"));
    assert!(decoded.iter().all(|p| p.comment_ref == 0));
}

#[test]
fn test_carried_quiz_text_is_canonical() {
    let mut pages = blank_pages(31);
    pages[0] = pages[0].clone().with_comment("#Q=[](t)z");
    let decoded = decode(&encode(&pages).unwrap()).unwrap();

    assert_eq!(decoded[0].comment.as_deref(), Some("#Q=[](t)z"));
    assert_eq!(decoded[30].comment.as_deref(), Some("#Q=[](T)Z"));
}

#[test]
fn test_gray_action_cannot_be_encoded() {
    let mut page = Page::new(0, Field::new());
    page.action = Action::place(Piece::Gray, Rotation::Spawn, Coordinate::new(4, 0));
    assert_eq!(encode(&[page]), Err(FumenError::UnsupportedPiece(8)));
}

#[test]
fn test_far_coordinate_commits_without_placing() {
    let mut page = Page::new(0, Field::new());
    page.action = Action::place(Piece::I, Rotation::Spawn, Coordinate::new(i8::MAX, i8::MAX));
    let next = page.next_page(Action::default());
    assert_eq!(next.field, Field::new());
}

#[test]
fn test_ceiling_blocks_are_dropped() {
    let mut page = Page::new(0, Field::new());
    page.field.set(3, 23, Piece::Gray);
    let decoded = decode(&encode(&[page]).unwrap()).unwrap();
    assert_eq!(decoded[0].field, Field::new());
}

#[test]
fn test_plain_comment_clears_quiz() {
    let mut pages = blank_pages(32);
    pages[0] = pages[0].clone().with_comment("#Q=[](T)I");
    pages[1] = pages[1].clone().with_comment("just text");
    let decoded = decode(&encode(&pages).unwrap()).unwrap();
    assert!(decoded[2..].iter().all(|p| p.comment.is_none()));
    assert!(decoded[2..].iter().all(|p| p.comment_ref == 1));
}

#[test]
fn test_quiz_mismatch_aborts_decode() {
    let pages = quiz_chain(
        "#Q=[](T)I",
        &[(Piece::Z, Rotation::Spawn, Coordinate::new(4, 0))],
    );
    assert_eq!(
        decode(&encode(&pages).unwrap()),
        Err(FumenError::UnexpectedHoldPiece(Piece::Z))
    );
}

#[test]
fn test_malformed_quiz_aborts_decode() {
    let pages = vec![Page::new(0, Field::new()).with_comment("#Q=(T)I")];
    assert!(matches!(
        decode(&encode(&pages).unwrap()),
        Err(FumenError::MalformedQuiz(_))
    ));
}

#[test]
fn test_rise_and_mirror_pages() {
    let mut rise = Page::new(0, Field::new());
    rise.block_up = FieldLine::from_row("XXXXXXXXX_").unwrap();
    rise.action.is_block_up = true;
    let after = rise.next_page(Action::default());
    assert_eq!(encode(&[rise, after]).unwrap(), "v115@lhI8AeAYJvhAAgH");

    let decoded = decode("v115@lhI8AeAYJvhAAgH").unwrap();
    assert_eq!(decoded[0].block_up.to_row(), "XXXXXXXXX_");
    assert!(decoded[1].block_up.is_empty());
    assert_eq!(bottom_rows(&decoded[1].field, 1), ["XXXXXXXXX_"]);

    let decoded = decode("v115@bhB8ReAQLvhAAgH").unwrap();
    assert_eq!(bottom_rows(&decoded[0].field, 1), ["XX________"]);
    assert!(decoded[0].action.is_mirror);
    assert_eq!(bottom_rows(&decoded[1].field, 1), ["________XX"]);
}

#[test]
fn test_malformed_inputs() {
    assert!(matches!(
        decode("v114@vhAAgH"),
        Err(FumenError::UnsupportedVersion(_))
    ));
    assert!(matches!(decode("v115@vh$AgH"), Err(FumenError::InvalidSymbol('$'))));
    let err = decode("v115@vhAAg").unwrap_err();
    assert!(matches!(err, FumenError::StreamExhausted { .. }));
    assert!(err.is_malformed_fumen());
    assert_eq!(decode("v115@").unwrap(), Vec::<Page>::new());
}

#[test]
fn test_page_json_roundtrip() {
    let pages = decode(FIXTURE).unwrap();
    let json = serde_json::to_string(&pages).unwrap();
    let back: Vec<Page> = serde_json::from_str(&json).unwrap();
    assert_eq!(back, pages);
}

#[test]
fn test_minimal_page_json() {
    let pages: Vec<Page> = serde_json::from_str(r#"[{}, {"index": 1}]"#).unwrap();
    assert_eq!(encode(&pages).unwrap(), "v115@vhBAgHAgH");
}

fn page_strategy() -> impl Strategy<Value = (u32, Option<String>, Vec<u8>)> {
    (
        0u32..245_760,
        prop::option::of("[a-z][ -~テトリス]{0,12}"),
        prop::collection::vec(0u8..=8, 10),
    )
}

fn build_pages(specs: &[(u32, Option<String>, Vec<u8>)]) -> Vec<Page> {
    let mut pages: Vec<Page> = Vec::with_capacity(specs.len());
    for (i, (action_value, comment, line)) in specs.iter().enumerate() {
        let mut action = decode_action(*action_value).unwrap();
        action.is_comment = comment.is_some();

        let mut page = match pages.last() {
            Some(prev) => prev.next_page(action),
            None => Page {
                action,
                ..Page::new(i, Field::new())
            },
        };
        page.comment = comment.clone();
        for (x, &value) in line.iter().enumerate() {
            page.block_up.set(x as i8, Piece::from_value(value).unwrap());
        }
        pages.push(page);
    }
    pages
}

proptest! {
    #![proptest_config(ProptestConfig { cases: 64, .. ProptestConfig::default() })]

    #[test]
    fn prop_encode_decode_is_stable(page_specs in prop::collection::vec(page_strategy(), 1..12)) {
        let pages = build_pages(&page_specs);
        let fumen = encode(&pages).unwrap();
        let decoded = decode(&fumen).unwrap();

        prop_assert_eq!(decoded.len(), pages.len());
        for (got, want) in decoded.iter().zip(&pages) {
            prop_assert_eq!(&got.field, &want.field);
            prop_assert_eq!(&got.block_up, &want.block_up);
            prop_assert_eq!(&got.action, &want.action);
            if want.action.is_comment {
                prop_assert_eq!(&got.comment, &want.comment);
            }
        }

        prop_assert_eq!(encode(&decoded).unwrap(), fumen.clone());
        prop_assert_eq!(decode(&fumen).unwrap(), decoded);
    }
}
