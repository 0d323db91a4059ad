//! Reference vocabularies for skill validation.

/// Recognized technical skill terms, lower-cased.
pub const TECH_SKILLS: &[&str] = &[
    // Programming languages
    "python", "java", "javascript", "typescript", "c++", "c#", "c", "go", "golang",
    "rust", "ruby", "php", "swift", "kotlin", "scala", "r", "matlab", "perl",
    "shell", "bash", "powershell", "sql", "pl/sql", "t-sql",
    // Web
    "html", "css", "react", "angular", "vue", "vue.js", "node.js", "express",
    "django", "flask", "fastapi", "spring", "spring boot", "asp.net", ".net",
    "jquery", "bootstrap", "tailwind", "sass", "less", "webpack", "vite",
    // Databases
    "mysql", "postgresql", "mongodb", "redis", "cassandra", "dynamodb",
    "oracle", "sql server", "sqlite", "mariadb", "elasticsearch", "neo4j",
    "couchdb", "firebase", "supabase",
    // Cloud platforms and services
    "aws", "azure", "gcp", "google cloud", "cloud computing", "heroku", "digitalocean",
    "ec2", "s3", "lambda", "cloudformation", "terraform", "ansible",
    "rds", "cloudwatch", "iam",
    "azure functions", "azure devops", "azure data factory", "adf",
    "azure databricks", "synapse analytics", "adls", "blob storage",
    "cosmos db", "stream analytics",
    // Big data
    "hadoop", "spark", "apache spark", "kafka", "flink", "storm", "hive",
    "pig", "hdinsight", "databricks", "airflow", "luigi", "nifi",
    // Machine learning and AI
    "machine learning", "deep learning", "neural networks", "nlp",
    "natural language processing", "computer vision", "tensorflow", "pytorch",
    "keras", "scikit-learn", "xgboost", "lightgbm", "catboost",
    "transformers", "bert", "gpt", "llm", "generative ai", "rag",
    // Data science
    "pandas", "numpy", "scipy", "matplotlib", "seaborn", "plotly",
    "jupyter", "data analysis", "data visualization", "statistics",
    "probability", "linear algebra", "calculus",
    // DevOps and tooling
    "docker", "kubernetes", "jenkins", "gitlab", "github", "git",
    "ci/cd", "devops", "linux", "unix", "nginx", "apache",
    "monitoring", "prometheus", "grafana", "elk", "splunk",
    // Methodologies
    "agile", "scrum", "kanban", "waterfall", "lean", "six sigma",
    "tdd", "bdd", "test-driven development", "continuous integration",
    "continuous deployment", "microservices", "rest api", "graphql",
    // Data engineering
    "etl", "elt", "data pipeline", "data warehouse", "data lake",
    "dimensional modeling", "star schema", "snowflake schema",
    "fact table", "dimension table", "scd", "slowly changing dimension",
    // Testing
    "pytest", "unittest", "jest", "mocha", "selenium", "cypress",
    "junit", "testng", "automation testing", "manual testing",
    // Project management
    "jira", "confluence", "trello", "asana", "project management",
    "stakeholder management", "requirements gathering",
    // Engineering practice
    "problem solving", "debugging", "troubleshooting", "code review",
    "technical documentation", "system design", "architecture design",
    // Security
    "cybersecurity", "encryption", "authentication", "authorization",
    "oauth", "jwt", "ssl", "tls", "penetration testing", "vulnerability assessment",
    // Mobile
    "android", "ios", "react native", "flutter", "xamarin", "mobile development",
    // Emerging
    "blockchain", "cryptocurrency", "iot", "edge computing", "5g",
    "ar", "vr", "augmented reality", "virtual reality",
    // Business intelligence
    "power bi", "tableau", "looker", "qlik", "business intelligence",
    "data analytics", "reporting", "dashboards",
    // Networking
    "tcp/ip", "http", "https", "dns", "vpn", "firewall", "load balancing",
    "cdn", "networking", "routing", "switching",
];

/// Generic HR filler that noun-phrase chunking picks up but is never a skill.
pub const NOISE_PHRASES: &[&str] = &[
    "the company", "the team", "the project", "the role", "the position",
    "the candidate", "the system", "the application", "the platform",
    "a team", "a project", "a role", "a position", "a company",
    "our team", "our company", "our project", "our system",
    "this role", "this position", "this project", "this team",
    "good communication", "strong communication", "excellent communication",
    "team player", "fast learner", "self-motivated", "detail-oriented",
];
