pub mod configuration;

pub mod expression {
    pub mod expressionerror;
    pub mod tokenizer;
    pub mod symboltable;
    pub mod expr;
    pub mod parser;
    pub mod simplifier;
    pub mod formatter;
    pub mod compiledfunction;
    pub mod compiler;
}

pub mod integration {
    pub mod integrationerror;
    pub mod samplegrid;
    pub mod integralestimate;
    pub mod trapezoid;
    pub mod referencecurve;
    pub mod accuracyreport;
}

pub mod integrationproblem;

pub mod manager {
    pub mod namedobject;
    pub mod managererror;
    pub mod manager;
}

pub mod math {
    pub mod curve {
        pub mod curve;
        pub mod nonparametriccurve {
            pub mod nonparametriccurve;
        }
    }
}

pub mod trapezoidmethod;

#[cfg(test)]
mod proptests;
