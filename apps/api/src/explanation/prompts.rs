use crate::llm_client::prompts::DATA_ONLY_INSTRUCTION;

pub fn explanation_system_prompt() -> String {
    format!(
        "You are an HR assistant explaining an automated resume shortlisting decision. \
         {DATA_ONLY_INSTRUCTION} \
         Be concise and professional. Write plain prose in at most five sentences, \
         without headings or bullet points."
    )
}

pub fn explanation_user_prompt(candidate_name: &str, evaluation_json: &str) -> String {
    format!(
        "Explain why this candidate received their score.\n\n\
         Candidate: {candidate_name}\n\n\
         Candidate evaluation data:\n{evaluation_json}\n\n\
         Explanation:"
    )
}
