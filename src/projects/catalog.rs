use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One slide of the project showcase
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProjectCard {
    pub name: String,
    pub description: String,
    pub workflow: String,
    pub tech: Vec<String>,
    /// `owner/repo` on GitHub, when the project has a public repository
    pub github: Option<String>,
    pub homepage: Option<String>,
    pub html_url: Option<String>,
    pub stars: Option<u64>,
    pub forks: Option<u64>,
    #[serde(default)]
    pub topics: Vec<String>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl ProjectCard {
    fn curated(
        name: &str,
        github: Option<&str>,
        homepage: Option<&str>,
        description: &str,
        workflow: &str,
        tech: &[&str],
    ) -> Self {
        Self {
            name: name.to_string(),
            description: description.to_string(),
            workflow: workflow.to_string(),
            tech: tech.iter().map(|t| t.to_string()).collect(),
            github: github.map(str::to_string),
            homepage: homepage.map(str::to_string),
            ..Self::default()
        }
    }

    /// Best link to open for this project
    pub fn link(&self) -> Option<&str> {
        self.html_url
            .as_deref()
            .or(self.homepage.as_deref())
    }
}

/// Hand-curated showcase, shown as-is when enrichment is unavailable
pub fn curated_projects() -> Vec<ProjectCard> {
    vec![
        ProjectCard::curated(
            "Resume Screening System",
            Some("meddhiabetis/resume-screening-django"),
            None,
            "Django platform for resume ingestion and hybrid search (semantic + graph) with optional Gmail import.",
            "PDF/DOC/DOCX parsing → OCR fallback (Tesseract) → structure (skills/education/experience) → Pinecone semantic search + Neo4j relationships → advanced search UI with debug.",
            &[
                "Django", "PostgreSQL", "Pinecone", "Neo4j", "NLTK", "spaCy",
                "Sentence-Transformers", "Celery", "Redis", "Tesseract", "pdfminer.six",
                "pdf2image", "Google OAuth2",
            ],
        ),
        ProjectCard::curated(
            "YouTube Video Summarizer",
            Some("meddhiabetis/youtube-video-summarizer"),
            None,
            "End-to-end pipeline to transcribe and summarize educational videos with an interactive study assistant.",
            "Fetch YouTube → extract audio (FFmpeg) → Whisper transcription → LLM summarization → interactive Q&A in Streamlit.",
            &["Streamlit", "OpenAI Whisper", "FFmpeg", "Python", "LLM"],
        ),
        ProjectCard::curated(
            "LLM-Powered Network Optimization Advisor",
            Some("meddhiabetis/LLM-Powered-Network-Optimization-Advisor"),
            None,
            "Dockerized API around a LoRA-tuned Llama-3-8B for network KPI optimization suggestions.",
            "Receive KPI metrics → LLM (LoRA) reasoning → /optimize REST endpoint → health checks + env configuration (GPU-ready).",
            &["FastAPI", "Docker", "Llama-3-8B (LoRA)", "CUDA", "NVIDIA Toolkit"],
        ),
        ProjectCard::curated(
            "AI vs Human Text Classification",
            None,
            None,
            "Django UI + notebooks to classify whether text is AI-generated or human-written using BERT and classical ML baselines.",
            "Preprocess → TF-IDF + classical models → LSTM experiment → BERT fine-tuning → export for serving in web app.",
            &["Django", "scikit-learn", "TensorFlow/Keras (LSTM)", "BERT", "Transformers"],
        ),
        ProjectCard::curated(
            "Q-Learning Agent in a Hazardous Grid World",
            None,
            Some("https://www.kaggle.com/code/betismeddhia/q-learning-agent-in-a-hazardous-grid-world"),
            "Reinforcement learning notebook implementing Q-Learning in a stochastic, hazardous grid world.",
            "Define environment (states/rewards) → epsilon-greedy exploration → Q-table updates → convergence analysis and policy visualization.",
            &["Python", "NumPy", "RL", "Q-Learning", "Matplotlib"],
        ),
        ProjectCard::curated(
            "Substance Use Survey — PCA/MCA & Clustering (R)",
            None,
            Some("https://www.kaggle.com/code/betismeddhia/substance-use-survey-using-pca-mca-k-means"),
            "Realised by Betis Mohamed Dhia • Supervised by Mr. Ghazi Bel Mufti. Statistical analysis of student substance use behaviors.",
            "EDA (pie/bar/correlation) → PCA • MCA → clustering (HCPC, k-means) → interpret clusters and insights for potential interventions.",
            &["R", "tidyverse", "FactoMineR", "factoextra", "Cluster analysis"],
        ),
        ProjectCard::curated(
            "African Credit Scoring Challenge",
            None,
            Some("https://www.kaggle.com/code/betismeddhia/african-credit-scoring-challenge"),
            "Imbalanced credit scoring notebook applying ML techniques and evaluation tailored for skewed classes.",
            "EDA → preprocessing & imbalance handling → model training (tree/boosting ensembles) → metrics (ROC AUC, PR-AUC) and comparison.",
            &["Python", "Pandas", "scikit-learn", "XGBoost/LightGBM", "Imbalanced-learn"],
        ),
    ]
}
