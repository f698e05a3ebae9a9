//! Prompt templates and the text protocol literals
//!
//! The coordinator's guidance is a loosely structured text protocol: lines of
//! the form `<marker>: <value>` inside a free-form reply. The markers, the
//! completion phrases and the exclusion phrase below are matched as literal
//! substrings, so any phrasing drift by the model silently yields no match.

/// Role value reserved for the coordinator
pub const COORDINATOR_ROLE: &str = "コーディネーター";

/// Topic marker in coordinator replies
pub const TOPIC_MARKER: &str = "トピック:";

/// Next-speaker marker in coordinator replies
pub const NEXT_SPEAKER_MARKER: &str = "次の発言者:";

/// Substrings that mark an agent's task as complete
pub const COMPLETION_PHRASES: [&str; 2] = ["タスク完了", "要件満たす"];

/// A supplement containing this is left out of the transcript
pub const NO_SUPPLEMENT_PHRASE: &str = "補足は不要です";

/// Prefix of the text `respond` returns when the capability fails
pub const ERROR_PREFIX: &str = "エラーが発生しました: ";

/// Returned when the capability produced no messages
pub const NO_RESPONSE: &str = "応答がありませんでした。";

/// Returned when the operator declines a proposed action
pub const ACTION_CANCELLED: &str = "コマンドの実行がキャンセルされました。";

pub const CONFIRM_STOP: &str = "全てのエージェントがタスク完了を報告しました。議論を終了しますか？";
pub const CONFIRM_CONTINUE: &str = "議論を続けますか？";

const SUMMARY_REQUEST: &str = "上記の議論を簡潔にまとめてください。";
const NEXT_QUESTION_REQUEST: &str = "次のラウンドで議論すべき重要な質問を1つ提案してください。";
const FINAL_SUMMARY_REQUEST: &str = "上記を踏まえ、最終的または暫定的なまとめを提供してください。";

/// True if the text carries a completion phrase
pub fn signals_completion(content: &str) -> bool {
    COMPLETION_PHRASES
        .iter()
        .any(|phrase| content.contains(phrase))
}

/// The single prompt sent to an agent's capability
pub fn agent_prompt(query: &str, context: &str, topic: &str) -> String {
    format!(
        "{}\n\n{} {}\n\nユーザーの質問: {}\n\nあなたの回答:",
        context, TOPIC_MARKER, topic, query
    )
}

pub fn summary_request(context: &str) -> String {
    format!("{}\n\n{}", context, SUMMARY_REQUEST)
}

pub fn next_question_request(context: &str, summary: &str) -> String {
    format!("{}\n{}\n\n{}", context, summary, NEXT_QUESTION_REQUEST)
}

pub fn final_summary_context(context: &str) -> String {
    format!("{}\n\n{}", context, FINAL_SUMMARY_REQUEST)
}

pub fn action_approval(code: &str) -> String {
    format!("実行予定のコマンド: {}\nこのコマンドを実行しますか？", code)
}

/// Persona system prompt; coordinators get the coordination appendix
pub fn system_prompt(
    name: &str,
    personality: &str,
    expertise: &str,
    role: &str,
    is_coordinator: bool,
) -> String {
    let mut prompt = format!(
        r#"
{name}({personality}, {expertise}専門家): {role}として以下を厳守:
1. 質問に簡潔・正確に回答。不確実な場合は明示。
2. 必要に応じて他エージェントの補足を具体的に要請。
3. {expertise}関連の情報のみ提供。
4. 議論の十分性とまとめ可能性を判断・伝達。
5. 回答の一貫性を保持。
6. タスクが完了したと判断した場合は、「タスク完了」または「要件満たす」と明記してください。
7. 常に現在のトピックに関連する情報のみを提供してください。
Pythonコード実行可能。ファイルシステムアクセス可能。
"#
    );

    if is_coordinator {
        prompt.push_str(
            r#"
コーディネーターとして全体を統括し、議論を効果的に管理。
1. 各エージェントの「タスク完了」や「要件満たす」などの報告を注意深く監視し、
   全エージェントがタスクを完了したと報告した場合は、議論の終了を提案してください。
2. 各ラウンドで扱うべきトピックを明確に指定し、必要に応じて次の発言者を指名してください。
3. 議論が脱線しないよう、トピックの管理を行ってください。
4. 応答の中に以下の情報を含めてください：
   - トピック: [現在のトピック]
   - 次の発言者: [エージェント名]（必要な場合のみ）
"#,
        );
    }

    prompt
}
