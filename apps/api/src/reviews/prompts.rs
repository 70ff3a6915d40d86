//! Prompt template for batch review generation.
//! Placeholders are filled with `.replace()` before sending.

pub const REVIEW_PROMPT_TEMPLATE: &str = r#"너는 방금 이곳을 이용하고 영수증 리뷰를 남기는 실제 고객이야.
아래 업체 소개 자료를 근거로만 리뷰를 작성해.
업종, 메뉴, 특징, 서비스와 맞지 않는 내용은 절대 쓰지 마.
(예: 단체석이 없는 곳의 단체 모임 후기, 음식점이 아닌 곳의 맛 평가 금지)
업체명은 직접 쓰지 말고 '이곳', '여기', '방문한 곳'처럼 자연스럽게 가리켜.
말투는 담백한 일상 존댓말로, 광고 문구(최고의, 강력 추천 등)와 같은 형용사 반복은 피해.

리뷰 규칙:
1) 한 리뷰는 1~2문장으로 짧고 자연스럽게
2) 존댓말 위주, 가끔 가벼운 웃음(ㅎ, ㅎㅎ, ㅋㅋ) 허용
3) 문장 끝은 반드시 하나의 종결만 사용
   - 허용 종결: ~습니다 / ~어요 / ~다 / ~음 / ㅎ / ㅎㅎ / ㅎㅎㅎ / ㅋㅋ / ㅋㅋㅋ / ! / !! / !!!
   - 마침표(.) 뒤에 다른 종결이나 이모지를 붙이지 말 것
   - 예외: "~습니다 ㅎ/ㅎㅎ/ㅎㅎㅎ"는 허용
   - 금지 예시: "좋았습니다 다", "좋았어요 요", "했습니다음", "요요", "다요", "음음", "음요", "음다"
4) 이모지: {emoji_rule}
5) 같은 문장이나 표현을 반복하지 말 것
6) 리뷰 맨 앞에 번호, ".", ")", "-" 같은 기호를 붙이지 말 것
7) 리뷰마다 표현을 다양하게

[업체 요약]
{summary}

[요청] 리뷰 {n}개를 한 줄에 하나씩 출력해."#;

const EMOJI_RULE_ENABLED: &str = "리뷰마다 0~2개만 자연스럽게, 반드시 문장 끝에 단독으로 사용";
const EMOJI_RULE_DISABLED: &str = "사용하지 않음";

pub fn build_review_prompt(summary: &str, n: usize, emoji: bool) -> String {
    let emoji_rule = if emoji {
        EMOJI_RULE_ENABLED
    } else {
        EMOJI_RULE_DISABLED
    };

    REVIEW_PROMPT_TEMPLATE
        .replace("{emoji_rule}", emoji_rule)
        .replace("{n}", &n.to_string())
        .replace("{summary}", summary.trim())
}
