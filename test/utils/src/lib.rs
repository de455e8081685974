pub fn profile_fixture() -> &'static str {
    return r#"
{
  "name": "Jane Doe",
  "shortName": "Janie",
  "headline": "Backend Engineer",
  "assistantName": "Jane_AI",
  "summary": "Jane builds distributed systems.",
  "contact": "jane@example.com",
  "languages": "English",
  "education": "BSc Computer Science",
  "skillCategories": [
    { "name": "Backend", "skills": ["Rust", "Tokio"] }
  ],
  "experiences": [
    {
      "title": "Senior Engineer",
      "company": "Acme",
      "location": "Remote",
      "period": "2021 – Present",
      "description": "Payments platform.",
      "type": "Internal tool",
      "technologies": ["Rust", "PostgreSQL"],
      "responsibilities": ["Owned the ledger service."]
    }
  ],
  "projects": [
    {
      "name": "Queue Service",
      "role": "Author",
      "period": "2023",
      "description": "A durable job queue.",
      "technologies": ["Rust"],
      "type": "Public website"
    }
  ],
  "suggestedQuestions": [
    "What is your experience with Rust?",
    "How did you scale the ledger?"
  ]
}
"#
    .trim();
}

pub fn chat_history_fixture() -> &'static str {
    return r#"[{"id":"welcome","role":"model","text":"Hello! Ask me anything.","timestamp":"2024-05-01T10:00:00.000Z"},{"id":"1714557660000","role":"user","text":"Where do you work?","timestamp":"2024-05-01T10:01:00.000Z"},{"id":"1714557661000","role":"model","text":"At Acme.","isThinking":false,"timestamp":"2024-05-01T10:01:01.250Z"}]"#;
}

pub fn gemini_reply_fixture() -> &'static str {
    return r#"
{
  "candidates": [
    {
      "content": {
        "role": "model",
        "parts": [
          { "text": "Thinking about Lambda...", "thought": true },
          { "text": "Jane has " },
          { "text": "three years of Lambda experience." }
        ]
      },
      "finishReason": "STOP"
    }
  ]
}
"#
    .trim();
}

pub fn gemini_rate_limit_fixture() -> &'static str {
    return r#"
{
  "error": {
    "code": 429,
    "message": "You exceeded your current quota, please check your plan and billing details. Please retry in 12.5s.",
    "status": "RESOURCE_EXHAUSTED"
  }
}
"#
    .trim();
}
