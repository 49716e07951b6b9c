//! 内置题库
//!
//! 编译期写死的 10 道图形推理题，内容来自标准的
//! 逻辑与抽象推理测验题型。提示图形以文字描述表示，
//! 由渲染层决定如何呈现。

use crate::models::{Question, QuestionBank, QuestionKind};

fn question(
    kind: QuestionKind,
    prompts: &[&str],
    options: &[&str],
    correct_answer: &str,
    explanation: &str,
) -> Question {
    Question {
        kind,
        prompts: prompts.iter().map(|s| s.to_string()).collect(),
        options_are_images: options.is_empty(),
        options: options.iter().map(|s| s.to_string()).collect(),
        correct_answer: correct_answer.to_string(),
        explanation: explanation.to_string(),
    }
}

/// 构建内置题库
pub fn builtin() -> QuestionBank {
    QuestionBank {
        questions: vec![
            question(
                QuestionKind::SeriesCompletion,
                &[
                    "白色方形，左上角有小黑圆",
                    "白色方形，右上角有小黑圆",
                    "白色方形，右下角有小黑圆",
                ],
                &[
                    "白色方形，左上角有小黑圆",
                    "白色方形，右上角有小黑圆",
                    "白色方形，左下角有小黑圆",
                    "白色方形，右下角有小黑圆",
                ],
                "白色方形，左下角有小黑圆",
                "小黑圆沿方形四角顺时针移动。",
            ),
            question(
                QuestionKind::SeriesCompletion,
                &[
                    "大黑圆内有 1 个小白点",
                    "大黑圆内有 2 个小白点",
                    "大黑圆内有 3 个小白点",
                ],
                &[
                    "大黑圆内有 2 个小白点",
                    "大黑圆内有 3 个小白点",
                    "大黑圆内有 4 个小白点",
                    "大黑圆内有 5 个小白点",
                ],
                "大黑圆内有 4 个小白点",
                "圆内小白点的数量每一步递增一个。",
            ),
            question(
                QuestionKind::OddOneOut,
                &[
                    "三条竖直平行线",
                    "三条水平平行线",
                    "三条对角平行线（左上到右下）",
                    "两条竖直平行线",
                ],
                &[],
                "两条竖直平行线",
                "其余各项均由三条线组成，只有该项只有两条线。",
            ),
            question(
                QuestionKind::OddOneOut,
                &[
                    "实心黑色三角形，顶点朝上",
                    "实心黑色三角形，顶点朝下",
                    "实心黑色三角形，顶点朝右",
                    "空心白色三角形，顶点朝上",
                ],
                &[],
                "空心白色三角形，顶点朝上",
                "其余各项均为实心黑色三角形，只有该项是空心白色三角形。",
            ),
            question(
                QuestionKind::MatrixReasoning,
                &[
                    "第一行：1 个圆、2 个圆、3 个圆",
                    "第二行：1 个方形、2 个方形、3 个方形",
                    "第三行：1 个三角形、2 个三角形、？",
                ],
                &["1 个三角形", "2 个三角形", "3 个三角形", "4 个三角形"],
                "3 个三角形",
                "每一行中图形数量从左到右依次递增（1、2、3）。",
            ),
            question(
                QuestionKind::MatrixReasoning,
                &[
                    "第一行：黑圆、黑方、黑三角",
                    "第二行：白圆、白方、白三角",
                    "第三行：灰圆、灰方、？",
                ],
                &["黑三角", "白三角", "灰三角", "灰圆"],
                "灰三角",
                "横向看图形依次变化（圆 → 方 → 三角），纵向看颜色保持不变，缺失的图形应为灰三角。",
            ),
            question(
                QuestionKind::SeriesCompletion,
                &["方形内有 'X'", "方形内有 '+'", "方形内有 'X'"],
                &[
                    "方形内有 'X'",
                    "方形内有 '+'",
                    "方形内有圆形",
                    "方形内无符号",
                ],
                "方形内有 '+'",
                "图案按 'X'、'+'、'X'、'+' 交替出现。",
            ),
            question(
                QuestionKind::AdvancedSeriesCompletion,
                &[
                    "大圆内有小方形",
                    "大方形内有小圆",
                    "大三角形内有小方形",
                ],
                &[
                    "大三角形内有小圆",
                    "大方形内有小三角形",
                    "大圆内有小三角形",
                    "大圆内有小方形",
                ],
                "大三角形内有小圆",
                "外层图形按圆、方、三角的顺序推进，内层图形在圆与方之间交替，因此下一个外层是三角形，内层是圆。",
            ),
            question(
                QuestionKind::VisualAnalogy,
                &["关系一：方形 对应 带竖线的方形", "关系二：圆形 对应 ？"],
                &[
                    "带横线的圆形",
                    "带竖线的圆形",
                    "内有 'X' 的圆形",
                    "无线条的圆形",
                ],
                "带竖线的圆形",
                "该关系是在图形上添加一条竖线，同样的变换也要应用到圆形上。",
            ),
            question(
                QuestionKind::VisualAnalogy,
                &[
                    "关系一：大方形包含小圆 对应 大圆包含小方形",
                    "关系二：大三角形包含小星形 对应 ？",
                ],
                &[
                    "大星形包含小三角形",
                    "大三角形包含小星形",
                    "大三角形包含小圆",
                    "大星形包含大三角形",
                ],
                "大星形包含小三角形",
                "该关系是内外图形互换位置与角色，因此外层三角形与内层星形应当互换。",
            ),
        ],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{NUM_QUESTIONS, QuizPhase, SessionState};
    use chrono::Local;

    #[test]
    fn test_builtin_bank_is_valid() {
        let bank = builtin();
        assert_eq!(bank.len(), NUM_QUESTIONS);
        assert!(bank.validate().is_ok());
    }

    #[test]
    fn test_odd_one_out_choices_are_prompts() {
        let bank = builtin();
        for q in &bank.questions {
            if q.options_are_images {
                assert_eq!(q.choices(), &q.prompts[..]);
                assert!(q.options.is_empty());
            } else {
                assert_eq!(q.choices(), &q.options[..]);
            }
        }
    }

    #[test]
    fn test_all_correct_scores_full() {
        let bank = builtin();
        let mut session = SessionState::default();
        session.start(Local::now());

        for i in 0..bank.len() {
            let answer = bank.get(i).unwrap().correct_answer.clone();
            session.submit_answer(&bank, answer);
        }

        assert_eq!(session.score, NUM_QUESTIONS);
        assert_eq!(session.phase, QuizPhase::Completed);
    }
}
